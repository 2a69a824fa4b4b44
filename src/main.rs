//! `tibctl` application entry point.
//!
//! Start-up runs in a fixed order:
//! 1. `TIBCTL_*` environment variables are bound to flag names
//! 2. Command-line arguments are parsed
//! 3. The configuration file is resolved and loaded (best effort)
//! 4. The selected command runs against the resulting store
//!
//! Failures are rendered through `eyre` and the process exits with the code
//! carried by the command error.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use eyre::Report;
use mockable::DefaultEnv;
use tibctl::commands;
use tibctl::config::{Cli, EnvBindings, bootstrap};
use tibctl::logging;

/// Application entry point.
fn main() -> ExitCode {
    // Bind before parsing so the scan reflects the environment the process
    // started with.
    let bindings = EnvBindings::from_process();
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    let store = bootstrap(&cli, bindings, DefaultEnv::new());

    let mut stdout = io::stdout().lock();
    match commands::run(&cli, &store, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e.code();
            report(&Report::from(e));
            ExitCode::from(code)
        }
    }
}

/// Writes a failure report to standard error.
#[expect(clippy::print_stderr, reason = "CLI error output is the intended behaviour")]
fn report(error: &Report) {
    eprintln!("Error: {error:?}");
}
