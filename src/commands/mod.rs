//! Command handlers.
//!
//! Every handler receives the configuration store built at start-up and the
//! writer its output goes to. Handlers never read ambient state.

mod profile;

use std::io::Write;

use clap::CommandFactory;
use tracing::debug;

use crate::config::{Cli, Commands, ConfigSource, ConfigStore, OPTION_NAMES, to_env_name};
use crate::error::CommandError;

pub use profile::{run_profile, show_profile};

/// Exit code for command failures.
pub const EXIT_FAILURE: u8 = 1;

/// Dispatches the parsed command line.
///
/// # Errors
///
/// Returns a [`CommandError`] carrying the exit code when the selected
/// command fails.
pub fn run<E: mockable::Env>(
    cli: &Cli,
    store: &ConfigStore<E>,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    match &cli.command {
        None => print_help(out),
        Some(Commands::Profile(args)) => run_profile(args, store, out),
        Some(Commands::Config) => show_config(store, out),
        Some(Commands::Version) => show_version(out),
    }
}

fn print_help(out: &mut dyn Write) -> Result<(), CommandError> {
    let mut command = Cli::command();
    let help = command.render_help();
    write!(out, "{help}").map_err(write_failed)
}

/// Prints the program name and version.
///
/// # Errors
///
/// Fails only if the output cannot be written.
pub fn show_version(out: &mut dyn Write) -> Result<(), CommandError> {
    writeln!(out, "tibctl {}", env!("CARGO_PKG_VERSION")).map_err(write_failed)
}

/// Prints where configuration is read from and which environment variables
/// feed each option. Bound `TIBCTL_*` variables with no known option are
/// listed after the known ones.
///
/// # Errors
///
/// Fails only if the output cannot be written.
pub fn show_config<E: mockable::Env>(
    store: &ConfigStore<E>,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    debug!("showing configuration sources");
    let file = store
        .config_file_used()
        .map_or_else(|| String::from("none"), ToString::to_string);
    writeln!(out, "config file: {file}").map_err(write_failed)?;

    if let Some(ConfigSource::Search(search)) = store.source() {
        writeln!(out, "search path:").map_err(write_failed)?;
        for candidate in search.candidates() {
            writeln!(out, "  {candidate}").map_err(write_failed)?;
        }
    }

    writeln!(out, "environment:").map_err(write_failed)?;
    for name in OPTION_NAMES {
        let variable = to_env_name(name);
        let marker = if store.bindings().variable(name).is_some() {
            " (set)"
        } else {
            ""
        };
        writeln!(out, "  {name:<12} {variable}{marker}").map_err(write_failed)?;
    }
    for (flag, variable) in store
        .bindings()
        .iter()
        .filter(|(flag, _)| !OPTION_NAMES.contains(flag))
    {
        writeln!(out, "  {flag:<12} {variable} (set)").map_err(write_failed)?;
    }
    Ok(())
}

/// Maps an output failure to a command failure.
pub(crate) fn write_failed(e: std::io::Error) -> CommandError {
    CommandError::new(EXIT_FAILURE, e)
}
