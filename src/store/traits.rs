//! Asset cache trait definition.
//!
//! Defines the persist interface shared by the in-memory virtual store and
//! the disk-backed writer, so embedding code can register assets without
//! knowing which backend was linked.

use crate::error::Result;
use serde::Serialize;
use std::borrow::Cow;

/// Trait for asset cache backends.
///
/// The lifetime `'a` is how long persisted data must stay alive. The
/// virtual store keeps borrowed data for that long; the disk writer copies
/// the bytes out immediately and accepts any lifetime.
pub trait AssetCache<'a> {
    /// Registers `data` under `name`.
    ///
    /// If `name` already exists and `force_overwrite` is false this is a
    /// successful no-op returning [`PersistOutcome::Kept`].
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or the backend cannot store
    /// the data.
    fn persist(
        &mut self,
        name: &str,
        data: Cow<'a, [u8]>,
        force_overwrite: bool,
    ) -> Result<PersistOutcome>;

    /// Checks whether `name` has been persisted.
    fn exists(&self, name: &str) -> bool;
}

/// Result of a successful persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistOutcome {
    /// The data was written.
    Stored,
    /// An entry already existed and overwrite was not forced.
    Kept,
}

impl PersistOutcome {
    /// Returns `true` if the data was written.
    #[must_use]
    pub const fn is_stored(self) -> bool {
        matches!(self, Self::Stored)
    }

    /// Lowercase label for output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stored => "stored",
            Self::Kept => "kept",
        }
    }
}
