//! Logging setup.
//!
//! Diagnostics go through `tracing`. The subscriber writes to standard output
//! because configuration warnings are part of the tool's normal output.
//! `RUST_LOG` always takes precedence; otherwise the level is `warn`, or
//! `debug` with `--verbose`.

use tracing::{Level, debug};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber. Later calls are ignored.
pub fn init(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    if let Err(e) = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stdout).with_target(false))
        .with(filter)
        .try_init()
    {
        debug!(error = %e, "tracing subscriber already installed");
    }
}
