//! Shared fixtures and helper functions for config tests.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use mockable::MockEnv;
use ortho_config::MergeComposer;
use rstest::fixture;
use tempfile::TempDir;

use crate::config::{AppConfig, Cli, ConfigStore, EnvBindings};

/// Builds a `MockEnv` answering `string` lookups from `vars`.
pub fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
    let owned: Vec<(String, String)> = vars
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    let mut env = MockEnv::new();
    env.expect_string().returning(move |key| {
        owned
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    });
    env
}

/// Fixture providing a `MockEnv` with nothing set.
#[fixture]
pub fn empty_env() -> MockEnv {
    mock_env(&[])
}

/// Scans `vars` as `NAME=VALUE` entries and pairs the bindings with a matching
/// `MockEnv`.
pub fn store_with_env(vars: &[(&str, &str)]) -> ConfigStore<MockEnv> {
    let bindings = EnvBindings::scan(vars.iter().map(|(k, v)| format!("{k}={v}")));
    ConfigStore::new(mock_env(vars), bindings)
}

/// Parses a tibctl command line.
pub fn parse_cli(args: &[&str]) -> Cli {
    let argv = std::iter::once("tibctl").chain(args.iter().copied());
    Cli::try_parse_from(argv).expect("command line should parse")
}

/// A temporary directory addressed by a UTF-8 path.
pub struct ConfigDir {
    _dir: TempDir,
    /// Path to the directory.
    pub path: Utf8PathBuf,
}

impl ConfigDir {
    /// Writes `content` to `name` inside the directory and returns its path.
    pub fn write(&self, name: &str, content: &str) -> Utf8PathBuf {
        let path = self.path.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("parent directory should be created");
        }
        let mut file = std::fs::File::create(&path).expect("config file should be created");
        file.write_all(content.as_bytes())
            .expect("config file should be written");
        path
    }

    /// Path of the `tibctl` subdirectory, as used for `XDG_CONFIG_HOME`.
    pub fn app_dir(&self) -> Utf8PathBuf {
        self.path.join("tibctl")
    }

    /// The directory as a string, for environment values.
    pub fn as_str(&self) -> &str {
        self.path.as_str()
    }

    /// The directory path.
    pub fn as_path(&self) -> &Utf8Path {
        &self.path
    }
}

/// Fixture providing an empty temporary directory.
#[fixture]
pub fn config_dir() -> ConfigDir {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("temp path should be UTF-8");
    ConfigDir { _dir: dir, path }
}

/// Helper: Creates a `MergeComposer` with defaults layer already pushed.
pub fn create_composer_with_defaults() -> Result<MergeComposer, serde_json::Error> {
    let mut composer = MergeComposer::new();
    let defaults = ortho_config::serde_json::to_value(AppConfig::default())?;
    composer.push_defaults(defaults);
    Ok(composer)
}

/// Helper: Merges layers from a composer into `AppConfig`.
pub fn merge_config(
    composer: MergeComposer,
) -> Result<AppConfig, std::sync::Arc<ortho_config::OrthoError>> {
    AppConfig::merge_from_layers(composer.layers())
}
