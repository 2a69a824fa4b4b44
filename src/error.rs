//! Semantic error types for the tibctl application.
//!
//! Conditions a caller might inspect are modelled as `thiserror` enums, while
//! opaque reporting (`eyre::Report`) is reserved for the binary boundary.
//! Command failures are wrapped in [`CommandError`], which carries the process
//! exit code alongside the underlying cause.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration resolution and loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly named configuration file does not exist.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// The path that was requested.
        path: Utf8PathBuf,
    },

    /// No configuration file matched the search.
    #[error("no configuration file named '{name}' found in [{searched}]")]
    NotFound {
        /// The base name that was searched for.
        name: String,
        /// The directories that were searched, comma separated.
        searched: String,
    },

    /// The configuration file could not be read or parsed.
    #[error("failed to parse configuration file: {message}")]
    ParseError {
        /// A description of the parse error.
        message: String,
    },

    /// The `OrthoConfig` library returned an error while merging layers.
    #[error("configuration loading failed: {0}")]
    OrthoConfig(Arc<ortho_config::OrthoError>),
}

impl ConfigError {
    /// Returns whether this error means "no file was there to load".
    ///
    /// Only a failed search counts; an explicitly named file that is missing
    /// is reported to the user.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Top-level error type for the tibctl library.
#[derive(Debug, Error)]
pub enum TibctlError {
    /// An error occurred during configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Command output could not be written.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// A command failure carrying the exit code the process should terminate with.
#[derive(Debug, Error)]
#[error("command failed with exit code {code}")]
pub struct CommandError {
    code: u8,
    #[source]
    source: TibctlError,
}

impl CommandError {
    /// Wraps an error with the given exit code.
    pub fn new(code: u8, source: impl Into<TibctlError>) -> Self {
        Self {
            code,
            source: source.into(),
        }
    }

    /// The exit code for this failure.
    #[must_use]
    pub const fn code(&self) -> u8 {
        self.code
    }

    /// The underlying cause.
    #[must_use]
    pub const fn cause(&self) -> &TibctlError {
        &self.source
    }
}

/// A specialised `Result` type for tibctl operations.
pub type Result<T> = std::result::Result<T, TibctlError>;
