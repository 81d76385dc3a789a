//! Virtual file entries.
//!
//! An entry is a named byte buffer plus a read cursor. Entries are the
//! unit the virtual store registers and that handles point at.

use crate::core::EntryName;
use serde::Serialize;
use std::borrow::Cow;

/// A named byte buffer with a read cursor.
///
/// Borrowed data is referenced, never copied: the lifetime `'a` keeps the
/// caller's memory alive for as long as the entry exists. Owned data is
/// accepted for blobs produced at runtime.
///
/// The cursor is signed and unclamped. Seeking past either end is allowed
/// and shows up as zero available bytes on the next read.
///
/// # Examples
///
/// ```
/// use asset_cache::core::{Entry, EntryName};
///
/// let data = b"hello";
/// let entry = Entry::new(EntryName::new("a").unwrap(), &data[..]);
/// assert_eq!(entry.size(), 5);
/// assert_eq!(entry.remaining(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<'a> {
    name: EntryName,
    data: Cow<'a, [u8]>,
    cursor: i64,
}

impl<'a> Entry<'a> {
    /// Creates an entry with the cursor at 0.
    #[must_use]
    pub fn new(name: EntryName, data: impl Into<Cow<'a, [u8]>>) -> Self {
        Self {
            name,
            data: data.into(),
            cursor: 0,
        }
    }

    /// Returns the entry name.
    #[must_use]
    pub const fn name(&self) -> &EntryName {
        &self.name
    }

    /// Returns the full buffer.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the buffer length in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the entry references caller memory.
    #[must_use]
    pub const fn is_borrowed(&self) -> bool {
        matches!(self.data, Cow::Borrowed(_))
    }

    /// Returns the current cursor.
    #[must_use]
    pub const fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Moves the cursor without bounds checks.
    pub const fn set_cursor(&mut self, cursor: i64) {
        self.cursor = cursor;
    }

    /// Resets the cursor to the start of the buffer.
    pub const fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Bytes between the cursor and the end of the buffer.
    ///
    /// Zero when the cursor lies outside `[0, size]`.
    #[must_use]
    pub fn remaining(&self) -> usize {
        usize::try_from(self.cursor)
            .ok()
            .and_then(|cursor| self.size().checked_sub(cursor))
            .unwrap_or(0)
    }

    /// Copies up to `len` bytes from the cursor into `dest` and advances.
    ///
    /// Returns the number of bytes copied, bounded by `len`, `dest.len()`
    /// and [`remaining`](Self::remaining).
    pub fn take_into(&mut self, dest: &mut [u8], len: usize) -> usize {
        let len = len.min(dest.len()).min(self.remaining());
        if len == 0 {
            return 0;
        }
        let start = self.size() - self.remaining();
        dest[..len].copy_from_slice(&self.data[start..start + len]);
        self.cursor = self.cursor.saturating_add(i64::try_from(len).unwrap_or(i64::MAX));
        len
    }

    /// Summarizes the entry for listings.
    #[must_use]
    pub fn info(&self, shadowed: bool) -> EntryInfo {
        EntryInfo {
            name: self.name.clone(),
            size: self.size(),
            cursor: self.cursor,
            borrowed: self.is_borrowed(),
            shadowed,
        }
    }
}

/// Serializable snapshot of an entry, without its data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryInfo {
    /// Entry name.
    pub name: EntryName,
    /// Buffer length in bytes.
    pub size: usize,
    /// Cursor at the time of the snapshot.
    pub cursor: i64,
    /// Whether the data is referenced rather than owned.
    pub borrowed: bool,
    /// Whether a newer entry with the same name hides this one.
    pub shadowed: bool,
}
