//! Disk cache configuration.
//!
//! The CLI loads it from a JSON file given with `--config`, then applies
//! flags and environment variables on top. Embedding applications can
//! deserialize it the same way.

use crate::error::{Error, Result};
use crate::store::{DEFAULT_CACHE_DIR, DiskCache};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming the disk cache root.
pub const CACHE_DIR_ENV: &str = "ASSET_CACHE_DIR";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "ASSET_CACHE_LOG";

/// Settings for the disk-backed cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory persisted assets are written under.
    pub root: PathBuf,
    /// Overwrite policy applied when a call does not force one.
    pub force_overwrite: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_CACHE_DIR),
            force_overwrite: false,
        }
    }
}

impl CacheConfig {
    /// Parses a JSON configuration; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the JSON is malformed or invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| Error::Config {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the root is empty.
    pub fn validate(&self) -> Result<()> {
        if self.root.as_os_str().is_empty() {
            return Err(Error::Config {
                message: "cache root must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Builds the disk cache writer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if validation fails.
    pub fn build(&self) -> Result<DiskCache> {
        self.validate()?;
        Ok(DiskCache::new(self.root.clone()))
    }
}
