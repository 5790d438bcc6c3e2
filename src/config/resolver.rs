//! Layered variable resolution.
//!
//! Every setting is looked up through a fixed four-candidate cascade
//! (highest to lowest):
//! 1. `NAME`, a native process environment variable
//! 2. `NAME_FILE`, a native variable naming a file whose content is the value
//! 3. `DOTENV_NAME_FILE`, a dotenv-sourced file reference
//! 4. `DOTENV_NAME`, a dotenv-sourced direct value
//!
//! The first non-empty candidate wins. Values are never merged across
//! sources, and callers apply their own defaults after resolution.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Prefix under which dotenv entries are exposed to the resolver.
pub const DOTENV_PREFIX: &str = "DOTENV_";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read secret file for {name} at {path}: {source}")]
    SecretFile {
        name: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to load env file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Pool of configuration variables, snapshotted once at startup.
///
/// Holds the process environment plus any dotenv entries injected under
/// [`DOTENV_PREFIX`]. Resolved values are cached back into the pool under
/// the bare name so repeated resolutions observe a single canonical value;
/// the process environment itself is never mutated.
#[derive(Debug, Clone, Default)]
pub struct VarPool {
    vars: HashMap<String, String>,
}

impl VarPool {
    /// Snapshot the current process environment.
    pub fn from_env() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build a pool from explicit entries. Used by tests and tooling that
    /// must not depend on ambient process state.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Insert an entry unless the key is already present.
    pub fn insert_if_absent(&mut self, key: String, value: String) {
        self.vars.entry(key).or_insert(value);
    }

    /// Resolve a setting through the four-candidate cascade.
    ///
    /// Returns `Ok(None)` when every candidate is empty. A file-backed
    /// candidate that names an unreadable path is a misconfiguration and
    /// surfaces as [`ConfigError::SecretFile`].
    pub fn resolve(&mut self, name: &str) -> Result<Option<String>> {
        if let Some(value) = self.lookup(name) {
            return Ok(Some(value));
        }

        let resolved = if let Some(path) = self.lookup(&format!("{name}_FILE")) {
            Some(self.read_secret_file(name, &path)?)
        } else if let Some(path) = self.lookup(&format!("{DOTENV_PREFIX}{name}_FILE")) {
            Some(self.read_secret_file(name, &path)?)
        } else {
            self.lookup(&format!("{DOTENV_PREFIX}{name}"))
        };

        // An empty file still leaves the setting empty for the caller.
        let resolved = resolved.filter(|v| !v.is_empty());

        if let Some(ref value) = resolved {
            self.vars.insert(name.to_string(), value.clone());
        }

        Ok(resolved)
    }

    /// Resolve a setting, falling back to `default` when every source is empty.
    pub fn resolve_or(&mut self, name: &str, default: &str) -> Result<String> {
        Ok(self.resolve(name)?.unwrap_or_else(|| default.to_string()))
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.vars.get(key).filter(|v| !v.is_empty()).cloned()
    }

    fn read_secret_file(&self, name: &str, path: &str) -> Result<String> {
        debug!("Reading {} from file {}", name, path);
        fs::read_to_string(path).map_err(|source| ConfigError::SecretFile {
            name: name.to_string(),
            path: PathBuf::from(path),
            source,
        })
    }
}
