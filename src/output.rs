//! # Terminal Output
//!
//! Output configuration (color detection honoring `NO_COLOR`/`CLICOLOR`),
//! the symbol set used across commands, width-aware truncation and the
//! shared per-repository outcome report.

use std::env;

use console::{style, Term};

use crate::batch::BatchOutcome;

/// Success marker.
pub const SUCCESS: &str = "✔";
/// Failure marker.
pub const ERROR: &str = "✖";
/// Commits ahead of upstream.
pub const AHEAD: &str = "↑";
/// Commits behind upstream.
pub const BEHIND: &str = "↓";
/// Uncommitted changes present.
pub const DIRTY: &str = "✱";

pub const ARCHIVED: &str = "(Archived)";
pub const FORK: &str = "(Fork)";
pub const PRIVATE: &str = "(Private)";

/// Output configuration for controlling colors.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// - `--color=always`: force colors on (overrides NO_COLOR)
    /// - `--color=never`: force colors off
    /// - `--color=auto`: detect based on environment
    ///
    /// In auto mode, colors are disabled if `NO_COLOR` is set (any value,
    /// including empty), `CLICOLOR=0` is set, `TERM=dumb` is set, or stdout
    /// is not a TTY (unless `CLICOLOR_FORCE=1`).
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // https://no-color.org/ - presence alone disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        Term::stdout().features().colors_supported()
    }

    /// Apply this configuration to the `console` styling globals.
    pub fn apply(&self) {
        console::set_colors_enabled(self.use_color);
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Truncate a line to the terminal width, appending `…` when cut.
pub fn truncate_line(line: &str) -> String {
    let (_, width) = Term::stdout().size();
    console::truncate_str(line, width as usize, "…").into_owned()
}

/// Print settled batch outcomes, one repository per line. The caller is
/// responsible for ordering (failures come first out of `run_batch`).
pub fn print_outcomes(outcomes: &[BatchOutcome]) {
    for outcome in outcomes {
        match &outcome.result {
            Ok(output) => {
                println!("{} {}", style(SUCCESS).green(), style(&outcome.id).cyan());
                if !output.is_empty() {
                    println!("{}", style(output).dim());
                }
            }
            Err(reason) => {
                println!("{} {}", style(ERROR).red(), style(&outcome.id).cyan());
                if !reason.is_empty() {
                    println!("{}", style(reason).dim());
                }
            }
        }
    }
}
