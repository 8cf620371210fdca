//! Store configuration
//!
//! Loaded from the environment (and an optional `.env` file) at startup, then
//! passed explicitly to [`crate::db::connect`].

use crate::errors::{config_error, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_DB_PATH: &str = "LIBRIS_DB_PATH";
pub const ENV_BUSY_TIMEOUT_MS: &str = "LIBRIS_BUSY_TIMEOUT_MS";

pub const DEFAULT_DB_PATH: &str = ".libris/library.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

const IN_MEMORY: &str = ":memory:";

/// Where the ledger lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    InMemory,
}

impl DatabaseLocation {
    /// `:memory:` selects an in-memory database, anything else is a path
    pub fn parse(value: &str) -> Self {
        if value == IN_MEMORY {
            Self::InMemory
        } else {
            Self::File(PathBuf::from(value))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database: DatabaseLocation,
    /// How long a unit of work waits for another connection's write lock
    pub busy_timeout: Duration,
    /// WAL journal for file databases
    pub journal_mode_wal: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database: DatabaseLocation::File(PathBuf::from(DEFAULT_DB_PATH)),
            busy_timeout: Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
            journal_mode_wal: true,
        }
    }
}

impl StoreConfig {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            database: DatabaseLocation::File(path.into()),
            ..Self::default()
        }
    }

    pub fn in_memory() -> Self {
        Self {
            database: DatabaseLocation::InMemory,
            ..Self::default()
        }
    }

    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    /// Load from `LIBRIS_DB_PATH` and `LIBRIS_BUSY_TIMEOUT_MS`
    ///
    /// A `.env` file in the working directory is read first if present.
    ///
    /// # Errors
    /// `InvalidInput` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys take their defaults
    ///
    /// # Errors
    /// `InvalidInput` if a value is empty or does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_DB_PATH) {
            if path.trim().is_empty() {
                return Err(config_error(ENV_DB_PATH, "cannot be empty"));
            }
            config.database = DatabaseLocation::parse(path.trim());
        }

        if let Some(raw) = lookup(ENV_BUSY_TIMEOUT_MS) {
            let millis: u64 = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                config_error(ENV_BUSY_TIMEOUT_MS, e.to_string())
            })?;
            config.busy_timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = StoreConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(
            config.database,
            DatabaseLocation::File(PathBuf::from(".libris/library.db"))
        );
        assert_eq!(config.busy_timeout, Duration::from_millis(5000));
    }

    #[test]
    fn test_memory_path_selects_in_memory() {
        let config =
            StoreConfig::from_lookup(lookup_from(&[(ENV_DB_PATH, ":memory:")])).unwrap();
        assert_eq!(config.database, DatabaseLocation::InMemory);
    }

    #[test]
    fn test_busy_timeout_parsed() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            (ENV_DB_PATH, "/tmp/lib.db"),
            (ENV_BUSY_TIMEOUT_MS, "250"),
        ]))
        .unwrap();
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
        assert_eq!(
            config.database,
            DatabaseLocation::File(PathBuf::from("/tmp/lib.db"))
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = StoreConfig::from_lookup(lookup_from(&[(ENV_BUSY_TIMEOUT_MS, "soon")]))
            .unwrap_err();
        assert_eq!(err.kind(), libris_core::ExErrorKind::InvalidInput);

        let err = StoreConfig::from_lookup(lookup_from(&[(ENV_DB_PATH, "  ")])).unwrap_err();
        assert_eq!(err.kind(), libris_core::ExErrorKind::InvalidInput);
    }
}
