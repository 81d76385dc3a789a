//! Asset cache backends.
//!
//! Two implementations of persist: the in-memory [`VirtualStore`], which also
//! emulates sequential reads, and the filesystem-backed [`DiskCache`]. The
//! `disk-cache` feature picks which one [`DefaultCache`] names.

pub mod disk;
pub mod memory;
pub mod traits;

pub use disk::DiskCache;
pub use memory::VirtualStore;
pub use traits::{AssetCache, PersistOutcome};

use std::path::Path;

/// Default directory for the disk cache, relative to the working directory.
pub const DEFAULT_CACHE_DIR: &str = ".asset-cache";

/// Backend linked for this build.
#[cfg(feature = "disk-cache")]
pub type DefaultCache = DiskCache;

/// Backend linked for this build.
#[cfg(not(feature = "disk-cache"))]
pub type DefaultCache = VirtualStore<'static>;

/// Constructs the backend linked for this build.
///
/// With `disk-cache` the cache writes under `root`; otherwise `root` is
/// ignored and an empty in-memory store is returned.
#[cfg(feature = "disk-cache")]
#[must_use]
pub fn default_cache(root: &Path) -> DefaultCache {
    DiskCache::new(root)
}

/// Constructs the backend linked for this build.
///
/// With `disk-cache` the cache writes under `root`; otherwise `root` is
/// ignored and an empty in-memory store is returned.
#[cfg(not(feature = "disk-cache"))]
#[must_use]
pub fn default_cache(_root: &Path) -> DefaultCache {
    VirtualStore::new()
}
