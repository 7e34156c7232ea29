//! Configuration types and loading.
//!
//! The main entry point is [`TipsConfig`], the contents of a `.tips.yaml`
//! file. [`load_config`] resolves which file applies (explicit path,
//! `$TIPS_CONFIG`, or `.tips.yaml` at the work tree root) and reads it.
//! Command-line flags override whatever is loaded here.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tips_core::datefmt::TimestampFormat;

/// File name looked up at the root of the work tree.
pub const CONFIG_FILE_NAME: &str = ".tips.yaml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TIPS_CONFIG";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration file contained invalid YAML.
    #[error("failed to parse config file {}: {source}", .path.display())]
    ParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// A configuration value was invalid.
    #[error("invalid configuration value for key '{key}': {reason}")]
    InvalidValue {
        /// The configuration key that had an invalid value.
        key: String,
        /// A description of why the value is invalid.
        reason: String,
    },
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Config struct
// ---------------------------------------------------------------------------

/// Report settings.
///
/// All fields use `serde` defaults so that a partially-specified YAML file
/// will be deserialized correctly with sensible default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TipsConfig {
    /// How commit dates are shown.
    #[serde(default)]
    pub timestamp_format: TimestampFormat,

    /// Number of hash characters shown.
    #[serde(default = "default_hash_length")]
    pub hash_length: usize,

    /// Fixed output width; detected from the terminal when unset.
    #[serde(default)]
    pub width: Option<usize>,

    /// Whether to fetch all remotes before reporting.
    #[serde(default = "default_true")]
    pub fetch: bool,

    /// Whether colored output is allowed at all.
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for TipsConfig {
    fn default() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
            hash_length: default_hash_length(),
            width: None,
            fetch: true,
            color: true,
        }
    }
}

fn default_hash_length() -> usize {
    12
}

fn default_true() -> bool {
    true
}

impl TipsConfig {
    /// Reject values that parse but make no sense.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero `hash-length`.
    pub fn validate(&self) -> Result<()> {
        if self.hash_length == 0 {
            return Err(ConfigError::InvalidValue {
                key: "hash-length".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Pick the config file to use.
///
/// Priority: `explicit` > `env_value` (from `$TIPS_CONFIG`) >
/// `<repo_root>/.tips.yaml` if that file exists. Returns `None` when no
/// file applies.
pub fn resolve_config_path(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
    repo_root: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(value));
    }
    repo_root
        .map(|root| root.join(CONFIG_FILE_NAME))
        .filter(|candidate| candidate.is_file())
}

/// Load the applicable configuration, or defaults if no file applies.
///
/// # Errors
///
/// Fails if an explicitly named file (flag or `$TIPS_CONFIG`) cannot be
/// read, or if the chosen file is malformed.
pub fn load_config(explicit: Option<&Path>, repo_root: Option<&Path>) -> Result<TipsConfig> {
    match resolve_config_path(explicit, std::env::var_os(CONFIG_ENV), repo_root) {
        Some(path) => load_config_file(&path),
        None => Ok(TipsConfig::default()),
    }
}

/// Load and validate a single config file.
///
/// An empty file is valid and yields the default config.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if the file cannot be read,
/// [`ConfigError::ParseError`] if it contains invalid YAML, or
/// [`ConfigError::InvalidValue`] if a value fails validation.
pub fn load_config_file(path: &Path) -> Result<TipsConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    if content.trim().is_empty() {
        return Ok(TipsConfig::default());
    }

    let config: TipsConfig =
        serde_yaml::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
