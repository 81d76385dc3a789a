//! Handles and seek origins.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_STORE_ID: AtomicU64 = AtomicU64::new(1);

/// Allocates a process-unique tag for a new store.
pub(crate) fn next_store_id() -> u64 {
    NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Reference to an open entry.
///
/// A handle is an index into the store that produced it, tagged with that
/// store's identity. Entries are never removed, so a handle stays valid for
/// the store's lifetime. Opening the same name twice yields equal handles
/// that share one cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    store: u64,
    index: usize,
}

impl Handle {
    pub(crate) const fn new(store: u64, index: usize) -> Self {
        Self { store, index }
    }

    pub(crate) const fn store(self) -> u64 {
        self.store
    }

    pub(crate) const fn index(self) -> usize {
        self.index
    }
}

/// Origin for [`seek`](crate::store::VirtualStore::seek).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekOrigin {
    /// `cursor = offset`.
    Start,
    /// `cursor = cursor + offset`.
    Current,
    /// `cursor = size - offset`.
    ///
    /// The offset is subtracted: pass a negative offset to land past the
    /// end, a positive one to land before it.
    End,
}

impl SeekOrigin {
    /// Maps the C-library origin constants (0, 1, 2).
    #[must_use]
    pub const fn from_whence(whence: i32) -> Option<Self> {
        match whence {
            0 => Some(Self::Start),
            1 => Some(Self::Current),
            2 => Some(Self::End),
            _ => None,
        }
    }

    /// Parses an origin name as used on the command line.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" | "set" => Some(Self::Start),
            "current" | "cur" => Some(Self::Current),
            "end" => Some(Self::End),
            _ => None,
        }
    }
}
