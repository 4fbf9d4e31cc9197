//! Runtime settings read from the environment and an optional `.env` file.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::allocator::AllocatorSettings;

/// Root directory holding the collection files.
pub const STORE_VAR: &str = "LISTING_ID_STORE";
/// Per-query store timeout in milliseconds.
pub const TIMEOUT_VAR: &str = "LISTING_ID_STORE_TIMEOUT_MS";
/// Number of full allocation passes before falling back.
pub const ATTEMPTS_VAR: &str = "LISTING_ID_MAX_ATTEMPTS";
/// Directory to record port cassettes into.
pub const RECORD_VAR: &str = "LISTING_ID_RECORD";

const DEFAULT_STORE: &str = ".listing-id";

/// A setting that was present but unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The value did not parse or was out of range.
    #[error("invalid {key}={value:?}: {reason}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Resolved settings for one CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Store root directory.
    pub store_root: PathBuf,
    /// Allocator tuning.
    pub allocator: AllocatorSettings,
    /// Where to record cassettes, if recording.
    pub record_dir: Option<PathBuf>,
}

impl Settings {
    /// Loads `.env` (if present) and then reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AllocatorSettings::default();

        let store_root = lookup(STORE_VAR)
            .filter(|v| !v.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STORE), PathBuf::from);

        let store_timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => Duration::from_millis(parse_positive(TIMEOUT_VAR, &raw)?),
            None => defaults.store_timeout,
        };

        let max_attempts = match lookup(ATTEMPTS_VAR) {
            Some(raw) => {
                let n = parse_positive(ATTEMPTS_VAR, &raw)?;
                u32::try_from(n).map_err(|e| invalid(ATTEMPTS_VAR, &raw, &e))?
            }
            None => defaults.max_attempts,
        };

        let record_dir = lookup(RECORD_VAR).filter(|v| !v.is_empty()).map(PathBuf::from);

        Ok(Self { store_root, allocator: AllocatorSettings { store_timeout, max_attempts }, record_dir })
    }
}

fn parse_positive(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    let n: u64 = raw.trim().parse().map_err(|e| invalid(key, raw, &e))?;
    if n == 0 {
        return Err(invalid(key, raw, &"must be at least 1"));
    }
    Ok(n)
}

fn invalid(key: &'static str, raw: &str, reason: &dyn std::fmt::Display) -> ConfigError {
    ConfigError::Invalid { key, value: raw.to_string(), reason: reason.to_string() }
}
