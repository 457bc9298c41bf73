//! Configuration file parsing for SyncWatch
//!
//! Every section is optional; anything left out falls back to the defaults
//! in [`crate::constants`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::constants::*;
use crate::error::{Error, Result};

/// Top-level configuration (config.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub limits: LimitsConfig,
    pub cache: CacheConfig,
    pub web: WebConfig,
}

/// Filesystem locations that are scanned
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Sync-enabled storage root (snapshot side)
    pub live_root: PathBuf,
    /// Writable storage root
    pub home_root: PathBuf,
    /// Single-line status file written by the sync process
    pub status_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            live_root: PathBuf::from(DEFAULT_LIVE_ROOT),
            home_root: PathBuf::from(DEFAULT_HOME_ROOT),
            status_file: PathBuf::from(DEFAULT_STATUS_FILE),
        }
    }
}

/// Size caps in bytes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub catalog_max_bytes: u64,
    pub download_max_bytes: u64,
    pub status_max_bytes: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            catalog_max_bytes: DEFAULT_CATALOG_MAX_BYTES,
            download_max_bytes: DEFAULT_DOWNLOAD_MAX_BYTES,
            status_max_bytes: DEFAULT_STATUS_MAX_BYTES,
        }
    }
}

/// Cache lifetimes in seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub catalog_ttl_secs: u64,
    pub status_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            catalog_ttl_secs: DEFAULT_CATALOG_TTL_SECS,
            status_ttl_secs: DEFAULT_STATUS_TTL_SECS,
        }
    }
}

impl CacheConfig {
    pub fn catalog_ttl(&self) -> Duration {
        Duration::from_secs(self.catalog_ttl_secs)
    }

    pub fn status_ttl(&self) -> Duration {
        Duration::from_secs(self.status_ttl_secs)
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub bind: String,
    /// Required `X-API-Key` value; `None` leaves the API open
    pub api_key: Option<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            api_key: None,
        }
    }
}

impl Config {
    /// Load config from the default path
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from a specific path, using defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Config not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;

        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the registry cannot work with
    pub fn validate(&self) -> Result<()> {
        for (name, root) in [
            ("live_root", &self.paths.live_root),
            ("home_root", &self.paths.home_root),
            ("status_file", &self.paths.status_file),
        ] {
            if !root.is_absolute() {
                return Err(Error::config(format!(
                    "paths.{} must be absolute: {}",
                    name,
                    root.display()
                )));
            }
        }

        if self.limits.catalog_max_bytes == 0 || self.limits.download_max_bytes == 0 {
            return Err(Error::config("size limits must be greater than zero"));
        }

        Ok(())
    }
}
