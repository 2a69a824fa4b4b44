//! The configuration store and its loading phases.
//!
//! [`ConfigStore`] is the merged key/value view a command reads from. It holds
//! three layers (lowest to highest precedence): the configuration file, the
//! environment bindings, and explicitly supplied CLI flags. Keys are canonical
//! flag names such as `base-url`; dotted keys reach into nested file maps.
//!
//! The store is built once by [`bootstrap`] and handed to command handlers by
//! reference. Environment values are read through a `mockable::Env` on every
//! lookup, so tests can substitute a `MockEnv` instead of touching the process
//! environment.
//!
//! # Loading policy
//!
//! Loading the file is best effort. A search that finds nothing is normal and
//! only logged at debug level. Any other failure (an explicit path that does not
//! exist, an unreadable file, malformed YAML) is reported as a warning and
//! start-up continues with flags and environment alone.

use std::io::ErrorKind;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use ortho_config::MergeComposer;
use ortho_config::serde_json::{self, Map, Value};
use tracing::{debug, warn};

use super::env::EnvBindings;
use super::resolver::{ConfigSource, resolve_source};
use super::{AppConfig, Cli, Commands, ProfileArgs, STRING_KEYS, TYPED_KEYS};
use crate::error::{ConfigError, Result, TibctlError};

/// Layered configuration for a single run.
#[derive(Debug)]
pub struct ConfigStore<E: mockable::Env> {
    flags: Map<String, Value>,
    bindings: EnvBindings,
    file: Map<String, Value>,
    source: Option<ConfigSource>,
    config_file_used: Option<Utf8PathBuf>,
    env: E,
}

impl<E: mockable::Env> ConfigStore<E> {
    /// Creates an empty store reading environment values from `env`.
    pub fn new(env: E, bindings: EnvBindings) -> Self {
        Self {
            flags: Map::new(),
            bindings,
            file: Map::new(),
            source: None,
            config_file_used: None,
            env,
        }
    }

    /// Records an explicitly supplied flag value.
    pub fn set_flag(&mut self, key: &str, value: impl Into<Value>) {
        self.flags.insert(key.to_owned(), value.into());
    }

    /// Records every flag the user supplied on the command line.
    ///
    /// Flags left unset are not recorded, so lower layers still apply to them.
    pub fn bind_cli(&mut self, cli: &Cli) {
        let global = &cli.global;
        if let Some(secret) = &global.secret {
            self.set_flag("secret", secret.as_str());
        }
        if let Some(base_url) = &global.base_url {
            self.set_flag("base-url", base_url.as_str());
        }
        if let Some(profile) = &global.profile {
            self.set_flag("profile", profile.as_str());
        }
        if let Some(path) = &global.config_file {
            self.set_flag("config-file", path.as_str());
        }
        if let Some(Commands::Profile(args)) = &cli.command {
            self.bind_profile_args(args);
        }
    }

    fn bind_profile_args(&mut self, args: &ProfileArgs) {
        if let Some(output) = args.view.output {
            // ValueEnum names match the serde names.
            if let Ok(value) = serde_json::to_value(output) {
                self.flags.insert(String::from("output"), value);
            }
        }
        if let Some(query) = &args.view.query {
            self.set_flag("query", query.as_str());
        }
    }

    /// Reads the configuration file described by `source` into the file layer.
    ///
    /// The file layer is replaced, never merged, so at most one file
    /// contributes per run.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` when a search finds no file,
    /// `ConfigError::FileNotFound` when an explicit path does not exist, and
    /// `ConfigError::ParseError` when the file cannot be read or parsed.
    pub fn read_in_config(&mut self, source: &ConfigSource) -> Result<()> {
        self.source = Some(source.clone());
        let path = match source {
            ConfigSource::File(path) => path.clone(),
            ConfigSource::Search(search) => {
                search.find().ok_or_else(|| ConfigError::NotFound {
                    name: search.name.clone(),
                    searched: search.searched(),
                })?
            }
        };

        self.file = load_config_file(&path)?;
        debug!(path = %path, keys = self.file.len(), "loaded configuration file");
        self.config_file_used = Some(path);
        Ok(())
    }

    /// Looks up `key`, trying flags, then the environment, then the file.
    pub fn get(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.flags.get(key) {
            return Some(value.clone());
        }
        if let Some(value) = self.bindings.lookup(key, &self.env) {
            return Some(Value::String(value));
        }
        lookup_path(&self.file, key).cloned()
    }

    /// Looks up `key` and renders scalar values as a string.
    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Returns whether any layer provides a value for `key`.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The source consulted during loading, if loading has run.
    #[must_use]
    pub const fn source(&self) -> Option<&ConfigSource> {
        self.source.as_ref()
    }

    /// The file that was actually loaded, if any.
    #[must_use]
    pub fn config_file_used(&self) -> Option<&Utf8Path> {
        self.config_file_used.as_deref()
    }

    /// The environment bindings recorded at start-up.
    #[must_use]
    pub const fn bindings(&self) -> &EnvBindings {
        &self.bindings
    }

    /// The environment provider.
    #[must_use]
    pub const fn env(&self) -> &E {
        &self.env
    }

    /// Builds the layers for the typed view, lowest precedence first.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` if the defaults cannot be serialised.
    pub fn composer(&self) -> Result<MergeComposer> {
        let mut composer = MergeComposer::new();

        let defaults =
            serde_json::to_value(AppConfig::default()).map_err(|e| ConfigError::ParseError {
                message: format!("failed to serialise defaults: {e}"),
            })?;
        composer.push_defaults(defaults);

        let file_values = typed_subset(&self.file);
        if !file_values.is_empty() {
            composer.push_file(Value::Object(file_values), self.config_file_used.clone());
        }

        let env_values = self.env_layer();
        if !env_values.is_empty() {
            composer.push_environment(Value::Object(env_values));
        }

        let cli_values = typed_subset(&self.flags);
        if !cli_values.is_empty() {
            composer.push_cli(Value::Object(cli_values));
        }

        Ok(composer)
    }

    /// Merges all layers into the typed [`AppConfig`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::OrthoConfig` if the merged values do not fit the
    /// typed configuration, for example an unknown `output` format.
    pub fn app_config(&self) -> Result<AppConfig> {
        let composer = self.composer()?;
        AppConfig::merge_from_layers(composer.layers())
            .map_err(|e| ConfigError::OrthoConfig(e).into())
    }

    /// Environment values for the options the typed view understands.
    fn env_layer(&self) -> Map<String, Value> {
        TYPED_KEYS
            .iter()
            .filter_map(|&flag| {
                self.bindings
                    .lookup(flag, &self.env)
                    .map(|value| (flag.to_owned(), Value::String(value)))
            })
            .collect()
    }
}

/// Builds the configuration store for a run.
///
/// Flags are recorded first, then the configuration source is resolved and
/// loaded on a best-effort basis.
pub fn bootstrap<E: mockable::Env>(cli: &Cli, bindings: EnvBindings, env: E) -> ConfigStore<E> {
    let mut store = ConfigStore::new(env, bindings);
    store.bind_cli(cli);

    let source = resolve_source(
        cli.global.config_file.as_deref(),
        cli.global.profile.as_deref(),
        store.env(),
    );
    if let Err(e) = store.read_in_config(&source) {
        match e {
            TibctlError::Config(ref config) if config.is_not_found() => {
                debug!(error = %e, "no configuration file loaded");
            }
            TibctlError::Config(_) | TibctlError::Output(_) => {
                warn!("failed to load configuration: {e}");
            }
        }
    }
    store
}

/// Reads and parses a YAML configuration file into a top-level map.
///
/// Uses `cap_std::fs_utf8` for capability-oriented filesystem access. The path
/// is canonicalised first, so a symlink pointing outside its directory is
/// followed, then the real parent directory is opened with ambient authority
/// and the file is read from there. An empty document yields an empty map.
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if the file or its directory does not
/// exist, and `ConfigError::ParseError` for other I/O failures, malformed YAML,
/// or a document whose top level is not a mapping.
pub fn load_config_file(path: &Utf8Path) -> Result<Map<String, Value>> {
    let not_found = || ConfigError::FileNotFound {
        path: path.to_owned(),
    };

    let resolved = path.canonicalize_utf8().map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            not_found()
        } else {
            ConfigError::ParseError {
                message: format!("failed to resolve {path}: {e}"),
            }
        }
    })?;
    let (Some(parent), Some(file_name)) = (resolved.parent(), resolved.file_name()) else {
        return Err(ConfigError::ParseError {
            message: format!("{path} does not name a file"),
        }
        .into());
    };

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            not_found()
        } else {
            ConfigError::ParseError {
                message: format!("failed to open directory {parent}: {e}"),
            }
        }
    })?;

    let content = dir.read_to_string(file_name).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            not_found()
        } else {
            ConfigError::ParseError {
                message: format!("failed to read {path}: {e}"),
            }
        }
    })?;

    let value =
        serde_yaml::from_str::<Value>(&content).map_err(|e| ConfigError::ParseError {
            message: format!("failed to parse {path}: {e}"),
        })?;

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(ConfigError::ParseError {
            message: format!("{path}: expected a mapping at the top level, found {other}"),
        }
        .into()),
    }
}

/// The entries of `layer` that map onto [`AppConfig`] fields.
///
/// Boolean and numeric scalars given for string-typed keys are rendered as
/// strings, so `secret: 12345` reads the same as `secret: "12345"`.
fn typed_subset(layer: &Map<String, Value>) -> Map<String, Value> {
    TYPED_KEYS
        .iter()
        .filter_map(|&key| {
            layer
                .get(key)
                .map(|value| (key.to_owned(), typed_value(key, value)))
        })
        .collect()
}

fn typed_value(key: &str, value: &Value) -> Value {
    if !STRING_KEYS.contains(&key) {
        return value.clone();
    }
    match value {
        Value::Bool(b) => Value::String(b.to_string()),
        Value::Number(n) => Value::String(n.to_string()),
        Value::Null | Value::String(_) | Value::Array(_) | Value::Object(_) => value.clone(),
    }
}

/// Resolves a dotted key against nested maps.
fn lookup_path<'a>(root: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    if let Some(value) = root.get(key) {
        return Some(value);
    }
    let mut segments = key.split('.');
    let first = segments.next()?;
    segments.try_fold(root.get(first)?, |current, segment| {
        current.as_object()?.get(segment)
    })
}
