//! The `profile` command group.
//!
//! Profile management against the API is not implemented; the subcommands
//! accept their arguments and succeed without doing anything.

use std::io::Write;

use tracing::debug;

use super::{EXIT_FAILURE, write_failed};
use crate::config::{ConfigStore, ProfileArgs, ProfileCommand};
use crate::error::{CommandError, ConfigError};

/// Runs `profile` or one of its subcommands.
///
/// # Errors
///
/// See [`show_profile`]; the subcommands themselves always succeed.
pub fn run_profile<E: mockable::Env>(
    args: &ProfileArgs,
    store: &ConfigStore<E>,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    match args.command {
        None => show_profile(store, out),
        Some(command) => {
            run_stub(command);
            Ok(())
        }
    }
}

/// Prints the resolved configuration.
///
/// # Errors
///
/// Returns a [`CommandError`] with exit code 1 if the layers cannot be merged
/// into a valid configuration or the result cannot be written.
pub fn show_profile<E: mockable::Env>(
    store: &ConfigStore<E>,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let config = store
        .app_config()
        .map_err(|e| CommandError::new(EXIT_FAILURE, e))?;
    let rendered = serde_yaml::to_string(&config).map_err(|e| {
        CommandError::new(
            EXIT_FAILURE,
            ConfigError::ParseError {
                message: format!("failed to render configuration: {e}"),
            },
        )
    })?;
    write!(out, "{rendered}").map_err(write_failed)
}

fn run_stub(command: ProfileCommand) {
    debug!(command = command.name(), "profile command has no remote operation yet");
}
