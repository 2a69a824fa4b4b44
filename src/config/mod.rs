//! Configuration system for tibctl.
//!
//! Values are layered with the precedence CLI flags > `TIBCTL_*` environment
//! variables > configuration file. The configuration file is YAML and is
//! chosen once per run:
//!
//! 1. `--config-file` / `-c`, used verbatim;
//! 2. `TIBCTL_CONFIG_FILE`, used verbatim;
//! 3. otherwise `<profile>.yaml` (or `.yml`) searched for in
//!    `$XDG_CONFIG_HOME/tibctl` (falling back to the platform configuration
//!    directory) and then `/etc/tibctl`. The profile is `--profile`, else
//!    `TIBCTL_PROFILE`, else `default`.
//!
//! A missing file is not an error.
//!
//! # Example Configuration
//!
//! ```yaml
//! secret: s3cr3t-token
//! base-url: https://api.example.com
//! output: json
//! ```

mod cli;
pub mod env;
mod loader;
pub mod resolver;
mod types;

#[cfg(test)]
mod tests;

pub use cli::{Cli, Commands, GlobalArgs, ProfileArgs, ProfileCommand, ViewArgs};
pub use env::{ENV_PREFIX, EnvBindings, from_env_name, to_env_name};
pub use loader::{ConfigStore, bootstrap, load_config_file};
pub use resolver::{ConfigFormat, ConfigSearch, ConfigSource, resolve_source, user_config_dir};
pub use types::{AppConfig, OutputFormat};

/// Profile name used when neither the flag nor the environment selects one.
pub const DEFAULT_PROFILE: &str = "default";

/// Environment variable naming an explicit configuration file.
pub const ENV_CONFIG_FILE: &str = "TIBCTL_CONFIG_FILE";

/// Environment variable selecting the profile.
pub const ENV_PROFILE: &str = "TIBCTL_PROFILE";

/// Environment variable overriding the user configuration directory.
pub const ENV_XDG_CONFIG_HOME: &str = "XDG_CONFIG_HOME";

/// Every option name tibctl understands, in canonical flag form.
pub const OPTION_NAMES: &[&str] = &[
    "secret",
    "base-url",
    "profile",
    "config-file",
    "output",
    "query",
];

/// Option names that map onto [`AppConfig`] fields.
pub(crate) const TYPED_KEYS: &[&str] = &["secret", "base-url", "profile", "output", "query"];

/// Typed keys whose [`AppConfig`] field holds a string.
pub(crate) const STRING_KEYS: &[&str] = &["secret", "base-url", "profile", "query"];
