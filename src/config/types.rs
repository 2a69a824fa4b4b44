//! Configuration data types for tibctl.

use clap::ValueEnum;
use ortho_config::{OrthoConfig, OrthoResult, PostMergeContext, PostMergeHook};
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Output format requested for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Table,
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
    /// Plain text.
    Text,
}

/// Typed view of the merged tibctl configuration.
///
/// Produced from the configuration store with layered precedence (lowest to
/// highest): defaults, configuration file, environment variables, command-line
/// flags. Keys are kebab-case in every layer so a file entry such as
/// `base-url: https://api.example.com` lines up with `--base-url` and
/// `TIBCTL_BASE_URL`.
#[derive(Debug, Clone, PartialEq, Eq, SmartDefault, Deserialize, Serialize, OrthoConfig)]
#[serde(rename_all = "kebab-case")]
#[ortho_config(prefix = "TIBCTL", post_merge_hook)]
pub struct AppConfig {
    /// Access token used to authenticate API calls.
    pub secret: Option<String>,

    /// Base URL of the API.
    pub base_url: Option<String>,

    /// Name of the active profile.
    #[default("default")]
    pub profile: String,

    /// Output format for command results.
    pub output: OutputFormat,

    /// Query expression applied to command results.
    pub query: Option<String>,
}

impl AppConfig {
    /// Drops empty optional values, trims trailing slashes from the base URL,
    /// and restores the default profile name if it was blanked.
    pub(crate) fn normalise(&mut self) {
        self.secret = self.secret.take().filter(|s| !s.is_empty());
        self.query = self.query.take().filter(|q| !q.is_empty());
        self.base_url = self
            .base_url
            .take()
            .map(|url| url.trim_end_matches('/').to_owned())
            .filter(|url| !url.is_empty());
        if self.profile.is_empty() {
            self.profile = String::from(super::DEFAULT_PROFILE);
        }
    }
}

impl PostMergeHook for AppConfig {
    fn post_merge(&mut self, _ctx: &PostMergeContext) -> OrthoResult<()> {
        self.normalise();
        Ok(())
    }
}
