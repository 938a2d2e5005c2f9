//! # Whoami Command Implementation
//!
//! Prints the login associated with the configured GitHub token.

use anyhow::{bail, Result};

use super::Session;

/// Execute the `whoami` command.
pub fn execute(session: &Session) -> Result<()> {
    match session.forge.viewer() {
        Some(login) => {
            println!("{}", login);
            Ok(())
        }
        None => bail!("Not authenticated: provide a GitHub token to resolve an identity"),
    }
}
