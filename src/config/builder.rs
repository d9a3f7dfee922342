use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::convert::{parse_bool, parse_double, parse_int};
use super::env::{lookup_env, EnvSource, ProcessEnv};
use super::file::{parse_file, IniOptions};
use super::resolve::{resolve, Resolution};
use super::source::ConfigTable;
use super::ConfigError;

/// Returned by [`ConfigStore::last_error_message`] when nothing has failed.
pub const NO_ERROR: &str = "No error";

/// A configuration session: the parsed INI entries plus an environment to
/// consult ahead of them.
///
/// A store starts uninitialized. While uninitialized every typed accessor
/// returns the caller's default. [`init`](Self::init) loads an optional INI
/// file; [`cleanup`](Self::cleanup) drops everything again.
///
/// ## Example
///
/// ```no_run
/// use fread::ConfigStore;
///
/// let store = ConfigStore::builder()
///     .with_file("config/app.ini")
///     .build()?;
///
/// let name = store.get_string("name", "unknown");
/// let port = store.get_int("port", 8080);
/// let debug = store.get_bool("debug", false);
/// # Ok::<(), fread::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct ConfigStore {
    env: Box<dyn EnvSource>,
    options: IniOptions,
    initialized: bool,
    table: ConfigTable,
    last_error: Option<String>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    /// Creates an uninitialized store reading the process environment.
    pub fn new() -> Self {
        Self::with_env(ProcessEnv)
    }

    /// Creates an uninitialized store reading variables from `env`.
    pub fn with_env(env: impl EnvSource + 'static) -> Self {
        Self::from_boxed_env(Box::new(env))
    }

    fn from_boxed_env(env: Box<dyn EnvSource>) -> Self {
        Self {
            env,
            options: IniOptions::default(),
            initialized: false,
            table: ConfigTable::new(),
            last_error: None,
        }
    }

    /// Creates a new store builder.
    pub fn builder() -> ConfigStoreBuilder {
        ConfigStoreBuilder::default()
    }

    /// Initializes the store, loading `path` when given.
    ///
    /// An initialized store is cleaned up first. If the file cannot be read
    /// or parsed the store is left uninitialized and empty, and the error's
    /// message is kept for [`last_error_message`](Self::last_error_message).
    pub fn init(&mut self, path: Option<&Path>) -> Result<(), ConfigError> {
        if self.initialized {
            self.cleanup();
        }
        self.initialized = true;

        let Some(path) = path else {
            info!("configuration initialized from environment only");
            return Ok(());
        };

        match parse_file(path, &self.options) {
            Ok(table) => {
                info!(path = %path.display(), entries = table.len(), "configuration initialized");
                self.table = table;
                Ok(())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load configuration");
                self.initialized = false;
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Drops all entries and the last error. Does nothing if uninitialized.
    pub fn cleanup(&mut self) {
        if !self.initialized {
            return;
        }
        self.table.clear();
        self.last_error = None;
        self.initialized = false;
    }

    /// Whether the last [`init`](Self::init) succeeded and no cleanup followed.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The parsed file entries, in file order. Empty when uninitialized.
    pub fn entries(&self) -> &ConfigTable {
        &self.table
    }

    /// The message of the last failed [`init`](Self::init), or [`NO_ERROR`].
    pub fn last_error_message(&self) -> &str {
        self.last_error.as_deref().unwrap_or(NO_ERROR)
    }

    /// Resolves `key` and reports where the value came from.
    pub fn resolve(&self, key: &str) -> Option<Resolution> {
        if !self.initialized {
            return None;
        }
        resolve(self.env.as_ref(), &self.table, key)
    }

    /// Like [`get_string`](Self::get_string), but reports a missing key.
    pub fn try_get(&self, key: &str) -> Result<String, ConfigError> {
        self.resolve(key)
            .map(|r| r.value)
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_owned()))
    }

    /// Returns the resolved value of `key`, or `default` when nothing resolves.
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.resolve(key)
            .map(|r| r.value)
            .unwrap_or_else(|| default.to_owned())
    }

    /// Returns `key` as a base-10 integer.
    ///
    /// Falls back to `default` when the key is missing, the value has
    /// trailing characters, or it overflows `i64`.
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.get_with(key, parse_int).unwrap_or(default)
    }

    /// Returns `key` as a boolean (`true`/`1`/`yes`/`on` or
    /// `false`/`0`/`no`/`off`, any case), or `default`.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get_with(key, parse_bool).unwrap_or(default)
    }

    /// Returns `key` as a float, or `default` unless the whole value parses.
    pub fn get_double(&self, key: &str, default: f64) -> f64 {
        self.get_with(key, parse_double).unwrap_or(default)
    }

    fn get_with<T>(&self, key: &str, parse: fn(&str) -> Option<T>) -> Option<T> {
        self.resolve(key).and_then(|r| parse(&r.value))
    }

    /// The first file entry for `key` under exactly `section`, ignoring the
    /// environment. `None` selects entries declared before any section.
    pub fn get_in_section(&self, section: Option<&str>, key: &str) -> Option<&str> {
        self.table.find(section, key).map(|e| e.value.as_str())
    }

    /// Whether `key` is set in the environment, by exact or upper-cased name.
    pub fn env_exists(&self, key: &str) -> bool {
        lookup_env(self.env.as_ref(), key).is_some()
    }
}

/// Builder for an initialized [`ConfigStore`].
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct ConfigStoreBuilder {
    file: Option<PathBuf>,
    env: Option<Box<dyn EnvSource>>,
    options: IniOptions,
}

impl ConfigStoreBuilder {
    /// Sets the INI file to load. Without one only the environment is used.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replaces the process environment with `env`.
    pub fn with_env(mut self, env: impl EnvSource + 'static) -> Self {
        self.env = Some(Box::new(env));
        self
    }

    /// Sets the longest accepted INI line, in bytes.
    pub fn with_max_line_length(mut self, max: usize) -> Self {
        self.options.max_line_length = max;
        self
    }

    /// Creates the store and initializes it from the configured file.
    pub fn build(self) -> Result<ConfigStore, ConfigError> {
        let mut store = match self.env {
            Some(env) => ConfigStore::from_boxed_env(env),
            None => ConfigStore::new(),
        };
        store.options = self.options;
        store.init(self.file.as_deref())?;
        Ok(store)
    }
}
