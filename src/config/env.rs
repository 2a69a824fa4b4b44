//! Environment variable binding.
//!
//! Any variable named `TIBCTL_<NAME>` acts as a fallback value for the flag
//! `<name>`, where the flag name is the lowercase, dash-separated form of
//! `<NAME>`. Bindings record only the variable *name*; values are read from the
//! environment each time a lookup happens.
//!
//! The translation is not a bijection. Flags are dash-separated, so a name that
//! already contains an underscore does not survive a round trip:
//! `to_env_name("a_b")` is `TIBCTL_A_B`, which maps back to `a-b`.

use std::collections::BTreeMap;

use tracing::trace;

/// Prefix identifying environment variables that belong to tibctl.
pub const ENV_PREFIX: &str = "TIBCTL";

/// Splits a raw `NAME=VALUE` entry.
///
/// Returns `None` unless the entry contains exactly one `=`.
#[must_use]
pub fn parse_entry(entry: &str) -> Option<(&str, &str)> {
    let mut parts = entry.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(value), None) => Some((name, value)),
        _ => None,
    }
}

/// Derives the canonical flag name for an environment variable name.
///
/// Returns `None` for names outside the `TIBCTL_` namespace and for the bare
/// prefix itself.
#[must_use]
pub fn from_env_name(name: &str) -> Option<String> {
    let rest = name.strip_prefix(ENV_PREFIX)?.strip_prefix('_')?;
    if rest.is_empty() {
        return None;
    }
    Some(rest.to_lowercase().replace('_', "-"))
}

/// Produces the environment variable name documented for a flag.
#[must_use]
pub fn to_env_name(flag: &str) -> String {
    format!("{ENV_PREFIX}_{}", flag.replace('-', "_").to_uppercase())
}

/// Mapping from canonical flag names to the environment variables bound to them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvBindings {
    vars: BTreeMap<String, String>,
}

impl EnvBindings {
    /// Binds every well-formed `TIBCTL_*` entry in `entries`.
    ///
    /// Entries that are malformed or outside the namespace are skipped.
    #[must_use]
    pub fn scan<I>(entries: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut vars = BTreeMap::new();
        for entry in entries {
            let raw = entry.as_ref();
            let Some((name, _)) = parse_entry(raw) else {
                trace!(entry = raw, "skipping malformed environment entry");
                continue;
            };
            let Some(flag) = from_env_name(name) else {
                continue;
            };
            trace!(flag = %flag, variable = name, "binding environment variable");
            vars.insert(flag, name.to_owned());
        }
        Self { vars }
    }

    /// Scans the current process environment.
    ///
    /// Entries whose name or value is not valid UTF-8 are ignored.
    #[must_use]
    pub fn from_process() -> Self {
        Self::scan(std::env::vars_os().filter_map(|(name, value)| {
            Some(format!("{}={}", name.to_str()?, value.to_str()?))
        }))
    }

    /// The environment variable bound to `flag`, if any.
    #[must_use]
    pub fn variable(&self, flag: &str) -> Option<&str> {
        self.vars.get(flag).map(String::as_str)
    }

    /// Reads the current value of the variable bound to `flag`.
    ///
    /// Unset and empty variables both yield `None`.
    pub fn lookup<E: mockable::Env>(&self, flag: &str, env: &E) -> Option<String> {
        self.variable(flag)
            .and_then(|var| env.string(var))
            .filter(|value| !value.is_empty())
    }

    /// Iterates over `(flag, variable)` pairs in flag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(flag, var)| (flag.as_str(), var.as_str()))
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` when nothing was bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
