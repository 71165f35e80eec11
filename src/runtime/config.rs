//! Worker spawn configuration.
//!
//! # Configuration Precedence
//!
//! Settings are resolved in this order (highest priority first):
//!
//! 1. **Programmatic**: values set via builder methods (`thread_name_prefix("io")`)
//! 2. **Environment variables**: values from `ASYNCVAL_*` env vars
//! 3. **Config file**: values loaded from a TOML file (requires `config-file` feature)
//! 4. **Defaults**: built-in defaults from [`SpawnConfig::default()`]
//!
//! # Supported Environment Variables
//!
//! | Variable | Type | Maps to |
//! |----------|------|---------|
//! | `ASYNCVAL_THREAD_NAME_PREFIX` | `String` | `thread_name_prefix` |
//! | `ASYNCVAL_THREAD_STACK_SIZE` | `usize` | `thread_stack_size` |

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Environment variable name for the worker thread name prefix.
pub const ENV_THREAD_NAME_PREFIX: &str = "ASYNCVAL_THREAD_NAME_PREFIX";
/// Environment variable name for the worker thread stack size.
pub const ENV_THREAD_STACK_SIZE: &str = "ASYNCVAL_THREAD_STACK_SIZE";

/// Default prefix for worker thread names.
pub const DEFAULT_THREAD_NAME_PREFIX: &str = "asyncval-worker";

/// Smallest stack size accepted for a worker thread.
pub const MIN_THREAD_STACK_SIZE: usize = 16 * 1024;

/// How workers are started by a [`ThreadSpawner`](super::ThreadSpawner).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpawnConfig {
    /// Worker threads are named `"{prefix}-{n}"`.
    pub thread_name_prefix: String,
    /// Stack size for worker threads; `None` uses the platform default.
    pub thread_stack_size: Option<usize>,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            thread_name_prefix: DEFAULT_THREAD_NAME_PREFIX.to_string(),
            thread_stack_size: None,
        }
    }
}

impl SpawnConfig {
    /// Sets the worker thread name prefix.
    #[must_use]
    pub fn thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Sets the worker thread stack size.
    #[must_use]
    pub const fn thread_stack_size(mut self, bytes: usize) -> Self {
        self.thread_stack_size = Some(bytes);
        self
    }

    /// Builds a config from defaults plus environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Parses a config from TOML text. Missing keys take their defaults.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a TOML config file, then applies environment overrides on top.
    #[cfg(feature = "config-file")]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        Self::from_file_with(path, read_env)
    }

    /// Loads a TOML config file, then applies overrides from `lookup` on top.
    ///
    /// [`from_file`](Self::from_file) calls this with the process environment.
    #[cfg(feature = "config-file")]
    pub fn from_file_with<F>(
        path: impl AsRef<std::path::Path>,
        lookup: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&text)?;
        apply_overrides_from(&mut config, lookup)?;
        Ok(config)
    }

    /// Checks that every setting is within range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thread_name_prefix.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "thread_name_prefix",
                reason: "must not be empty",
            });
        }
        if self
            .thread_stack_size
            .is_some_and(|size| size < MIN_THREAD_STACK_SIZE)
        {
            return Err(ConfigError::InvalidValue {
                field: "thread_stack_size",
                reason: "below minimum of 16 KiB",
            });
        }
        Ok(())
    }
}

/// Apply environment variable overrides to a [`SpawnConfig`].
///
/// Only variables that are set in the environment are applied.
/// Returns an error if a variable is set but contains an unparseable value.
pub fn apply_env_overrides(config: &mut SpawnConfig) -> Result<(), ConfigError> {
    apply_overrides_from(config, read_env)
}

/// Apply overrides from an arbitrary variable lookup.
///
/// [`apply_env_overrides`] calls this with the process environment.
pub fn apply_overrides_from<F>(config: &mut SpawnConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup(ENV_THREAD_NAME_PREFIX) {
        config.thread_name_prefix = val;
    }
    if let Some(val) = lookup(ENV_THREAD_STACK_SIZE) {
        config.thread_stack_size = Some(parse_usize(ENV_THREAD_STACK_SIZE, &val)?);
    }
    config.validate()
}

/// Read an environment variable, returning `None` if unset.
fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn parse_usize(var: &'static str, val: &str) -> Result<usize, ConfigError> {
    val.trim()
        .parse::<usize>()
        .map_err(|source| ConfigError::InvalidEnv {
            var,
            value: val.to_string(),
            source,
        })
}
