//! # Repoherd CLI
//!
//! Binary entry point for the `repoherd` command-line tool.
//!
//! Its responsibilities are parsing command-line arguments with `clap`,
//! executing the matching command, and translating top-level errors into
//! user-friendly output. The core logic lives in the `repoherd` library
//! crate; the binary is a thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
