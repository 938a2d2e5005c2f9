//! Subprocess primitive used by the scanner and the reconciliation flows.
//!
//! Using the system `git` command (rather than an in-process library) means
//! SSH keys, credential helpers, personal access tokens and anything else
//! configured in `~/.gitconfig` keep working unchanged.

use std::path::Path;
use std::process::{Command, Output};

use crate::error::{Error, Result};

/// Trait for git/shell subprocess execution - allows mocking in tests.
///
/// Both methods resolve to the trimmed stdout of the command, or fail with
/// `Error::Process` carrying the trimmed stderr (or the spawn error) on a
/// non-zero exit.
pub trait GitOperations: Send + Sync {
    /// Run `git <args>` inside `cwd`.
    fn git(&self, cwd: &Path, args: &[&str]) -> Result<String>;

    /// Run an arbitrary shell command inside `cwd`.
    fn shell(&self, cwd: &Path, command: &str) -> Result<String>;
}

/// The default implementation, backed by `std::process::Command`.
pub struct DefaultGitOperations;

impl GitOperations for DefaultGitOperations {
    fn git(&self, cwd: &Path, args: &[&str]) -> Result<String> {
        let rendered = format!("git {}", args.join(" "));
        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|e| Error::Process {
                command: rendered.clone(),
                stderr: e.to_string(),
            })?;
        collect(rendered, output)
    }

    fn shell(&self, cwd: &Path, command: &str) -> Result<String> {
        let output = shell_command(command)
            .current_dir(cwd)
            .output()
            .map_err(|e| Error::Process {
                command: command.to_string(),
                stderr: e.to_string(),
            })?;
        collect(command.to_string(), output)
    }
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

fn collect(command: String, output: Output) -> Result<String> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(Error::Process { command, stderr });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
