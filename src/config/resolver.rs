//! Configuration file resolution.
//!
//! Decides which configuration file a run should read. An explicit path (flag,
//! then `TIBCTL_CONFIG_FILE`) is used verbatim. Otherwise the profile name is
//! searched for as a YAML file in the user configuration directory and then in
//! the system directory.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::warn;

use super::{DEFAULT_PROFILE, ENV_CONFIG_FILE, ENV_PROFILE, ENV_XDG_CONFIG_HOME};

/// Name of the per-user configuration subdirectory.
pub const APP_DIR_NAME: &str = "tibctl";

/// System-wide configuration directory.
pub const SYSTEM_CONFIG_DIR: &str = "/etc/tibctl";

/// File formats a searched configuration file may have.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML, with a `.yaml` or `.yml` extension or none at all.
    #[default]
    Yaml,
}

impl ConfigFormat {
    /// File extensions tried, in order.
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Yaml => &["yaml", "yml"],
        }
    }
}

/// A search for a named configuration file across several directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSearch {
    /// Directories searched, highest priority first.
    pub dirs: Vec<Utf8PathBuf>,
    /// File base name (the profile name).
    pub name: String,
    /// Expected file format.
    pub format: ConfigFormat,
}

impl ConfigSearch {
    /// Every candidate path, directory by directory.
    ///
    /// Within a directory the known extensions come first, then the bare name.
    /// An extensionless file is still parsed in the search's format.
    #[must_use]
    pub fn candidates(&self) -> Vec<Utf8PathBuf> {
        self.dirs
            .iter()
            .flat_map(|dir| {
                self.format
                    .extensions()
                    .iter()
                    .map(move |ext| dir.join(format!("{}.{ext}", self.name)))
                    .chain(std::iter::once(dir.join(&self.name)))
            })
            .collect()
    }

    /// The first candidate that exists as a regular file.
    #[must_use]
    pub fn find(&self) -> Option<Utf8PathBuf> {
        self.candidates().into_iter().find(|path| path.is_file())
    }

    /// The searched directories joined for display.
    #[must_use]
    pub fn searched(&self) -> String {
        self.dirs
            .iter()
            .map(|dir| dir.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Where the configuration file for this run comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// An explicitly named file, used verbatim.
    File(Utf8PathBuf),
    /// A search by profile name.
    Search(ConfigSearch),
}

/// Works out the configuration source for this run.
///
/// Precedence for the file itself: `--config-file`, then `TIBCTL_CONFIG_FILE`,
/// then a search. For the searched name the profile flag is applied last, so it
/// overrides `TIBCTL_PROFILE`, which in turn overrides the default name.
pub fn resolve_source<E: mockable::Env>(
    config_file: Option<&Utf8Path>,
    profile: Option<&str>,
    env: &E,
) -> ConfigSource {
    if let Some(path) = config_file.filter(|p| !p.as_str().is_empty()) {
        return ConfigSource::File(path.to_owned());
    }
    if let Some(path) = non_empty_var(env, ENV_CONFIG_FILE) {
        return ConfigSource::File(Utf8PathBuf::from(path));
    }

    let mut search_dirs = Vec::with_capacity(2);
    if let Some(home) = user_config_dir(env) {
        search_dirs.push(home.join(APP_DIR_NAME));
    }
    search_dirs.push(Utf8PathBuf::from(SYSTEM_CONFIG_DIR));

    let mut name = String::from(DEFAULT_PROFILE);
    if let Some(from_env) = non_empty_var(env, ENV_PROFILE) {
        name = from_env;
    }
    if let Some(from_flag) = profile.filter(|p| !p.is_empty()) {
        name = from_flag.to_owned();
    }

    ConfigSource::Search(ConfigSearch {
        dirs: search_dirs,
        name,
        format: ConfigFormat::Yaml,
    })
}

/// The per-user configuration directory.
///
/// `XDG_CONFIG_HOME` wins when set; otherwise the platform default is used.
/// Returns `None` when neither is available as a UTF-8 path.
pub fn user_config_dir<E: mockable::Env>(env: &E) -> Option<Utf8PathBuf> {
    if let Some(xdg) = non_empty_var(env, ENV_XDG_CONFIG_HOME) {
        return Some(Utf8PathBuf::from(xdg));
    }
    let Some(platform) = dirs::config_dir() else {
        warn!("no user configuration directory available; searching system path only");
        return None;
    };
    match Utf8PathBuf::try_from(platform) {
        Ok(path) => Some(path),
        Err(e) => {
            warn!(path = %e.as_path().display(), "user configuration directory is not valid UTF-8");
            None
        }
    }
}

fn non_empty_var<E: mockable::Env>(env: &E, key: &str) -> Option<String> {
    env.string(key).filter(|value| !value.is_empty())
}
