//! Command implementations

use std::io::Write;

use crate::error::{CliError, Result as CliResult};

pub mod async_utils;
pub mod database;
pub mod profile;
pub mod user;

/// Ask for confirmation before a destructive operation unless --yes was given
pub fn confirm_deletion(what: &str, yes: bool) -> CliResult<()> {
    if yes {
        return Ok(());
    }

    print!("Delete {}? This cannot be undone. [y/N] ", what);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();

    if answer == "y" || answer == "yes" {
        Ok(())
    } else {
        Err(CliError::InvalidInput {
            message: "aborted".to_string(),
        })
    }
}
