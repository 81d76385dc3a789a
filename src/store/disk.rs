//! Disk-backed persist.
//!
//! On hosts with a real filesystem, assets are materialized as ordinary
//! files and read back through `std::fs`, so only persist is provided here.

use crate::error::{IoError, Result};
use crate::store::DEFAULT_CACHE_DIR;
use crate::store::traits::{AssetCache, PersistOutcome};
use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Writes persisted assets as files under a root directory.
///
/// Names are relative paths below the root. Absolute paths and `..`
/// segments are rejected.
///
/// # Examples
///
/// ```no_run
/// use asset_cache::store::DiskCache;
///
/// let cache = DiskCache::new(".asset-cache");
/// cache.persist("seas_18.se1", b"data", false).unwrap();
/// assert!(cache.exists("seas_18.se1"));
/// ```
#[derive(Debug, Clone)]
pub struct DiskCache {
    root: PathBuf,
}

impl DiskCache {
    /// Creates a writer rooted at `root`.
    ///
    /// The directory is created lazily on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `name` to its path below the root.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::PathTraversal`] if `name` is empty, absolute, or
    /// contains `..`.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        let relative = Path::new(name);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if name.is_empty() || escapes {
            return Err(IoError::PathTraversal {
                path: name.to_string(),
            }
            .into());
        }
        Ok(self.root.join(relative))
    }

    /// Writes `data` to `name`, creating or truncating the file.
    ///
    /// An existing file is left alone unless `force_overwrite` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the path escapes the root, a parent directory
    /// cannot be created, or the file cannot be opened, written, or synced.
    pub fn persist(&self, name: &str, data: &[u8], force_overwrite: bool) -> Result<PersistOutcome> {
        let path = self.path_for(name)?;
        let path_str = path.to_string_lossy().to_string();

        if path.exists() && !force_overwrite {
            debug!(path = %path_str, "file exists, keeping original");
            return Ok(PersistOutcome::Kept);
        }

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| IoError::DirectoryFailed {
                path: parent.to_string_lossy().to_string(),
                reason: e.to_string(),
            })?;
        }

        let write_failed = |e: std::io::Error| IoError::WriteFailed {
            path: path_str.clone(),
            reason: e.to_string(),
        };
        let mut file = File::create(&path).map_err(write_failed)?;
        file.write_all(data).map_err(write_failed)?;
        file.sync_all().map_err(write_failed)?;

        debug!(path = %path_str, size = data.len(), "wrote cache file");
        Ok(PersistOutcome::Stored)
    }

    /// Returns `true` if a filesystem entry exists for `name`.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_ok_and(|path| path.exists())
    }
}

impl Default for DiskCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_DIR)
    }
}

impl<'a> AssetCache<'a> for DiskCache {
    fn persist(
        &mut self,
        name: &str,
        data: Cow<'a, [u8]>,
        force_overwrite: bool,
    ) -> Result<PersistOutcome> {
        Self::persist(self, name, &data, force_overwrite)
    }

    fn exists(&self, name: &str) -> bool {
        Self::exists(self, name)
    }
}
