//! Ingestion configuration.
//!
//! A [`Config`] names the Medium user whose feed to ingest and whether the
//! normalized batch should be cached on disk. Hosts usually build it
//! directly; [`Config::from_toml_str`] is available for hosts that keep
//! their settings in a TOML document. Missing cache fields fall back to
//! defaults; the username itself is validated once, at the start of an
//! ingestion call.

use std::path::PathBuf;

use serde::Deserialize;

use crate::app::{FreshetError, Result};

/// Per-ingestion configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Medium username, without the leading `@`.
    pub username: String,
    #[serde(default, alias = "storage")]
    pub cache: CacheConfig,
}

/// Cache behaviour for the normalized post batch.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Directory the per-username cache files live in.
    pub path: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Build a configuration with caching disabled.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            cache: CacheConfig::default(),
        }
    }

    /// Build a configuration that caches under `path`.
    pub fn with_cache(username: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            username: username.into(),
            cache: CacheConfig {
                enabled: true,
                path: path.into(),
            },
        }
    }

    /// Parse a TOML document into a configuration.
    ///
    /// Missing cache fields use default values; a missing username is an
    /// error.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| FreshetError::Config(e.to_string()))
    }

    /// Reject configurations that cannot be acted on.
    ///
    /// Runs before any network or file activity.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(FreshetError::Config("Medium username is required".into()));
        }
        Ok(())
    }
}

impl CacheConfig {
    /// Cache file for a username: `<path>/<username>.json`.
    pub fn file_for(&self, username: &str) -> PathBuf {
        self.path.join(format!("{username}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_defaults() {
        let cache = CacheConfig::default();
        assert!(!cache.enabled);
        assert_eq!(cache.path, PathBuf::from("."));
    }

    #[test]
    fn test_from_toml_full() {
        let config = Config::from_toml_str(
            r#"
            username = "alice"

            [cache]
            enabled = true
            path = ".cache/medium"
            "#,
        )
        .unwrap();

        assert_eq!(config.username, "alice");
        assert!(config.cache.enabled);
        assert_eq!(config.cache.path, PathBuf::from(".cache/medium"));
    }

    #[test]
    fn test_from_toml_missing_cache_section() {
        let config = Config::from_toml_str(r#"username = "bob""#).unwrap();
        assert!(!config.cache.enabled);
    }

    #[test]
    fn test_from_toml_storage_alias() {
        let config = Config::from_toml_str(
            r#"
            username = "carol"

            [storage]
            enabled = true
            "#,
        )
        .unwrap();
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_from_toml_missing_username_is_error() {
        assert!(Config::from_toml_str("").is_err());
    }

    #[test]
    fn test_validate_rejects_empty_username() {
        assert!(Config::new("").validate().is_err());
        assert!(Config::new("   ").validate().is_err());
        assert!(Config::new("alice").validate().is_ok());
    }

    #[test]
    fn test_cache_file_path() {
        let config = Config::with_cache("alice", ".cache/medium");
        assert_eq!(
            config.cache.file_for(&config.username),
            PathBuf::from(".cache/medium/alice.json")
        );
    }
}
