//! In-memory virtual store.
//!
//! Holds named byte buffers and emulates sequential file access over them:
//! open, seek, tell, read, rewind, close. Entries are only ever added.
//! Persisting an existing name with overwrite appends a newer entry that
//! shadows the old one; the old entry stays resident until the store drops.

use crate::core::handle::next_store_id;
use crate::core::{Entry, EntryInfo, EntryName, Handle, SeekOrigin};
use crate::error::{Result, StoreError};
use crate::io::VirtualFile;
use crate::store::traits::{AssetCache, PersistOutcome};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, trace};

/// Registry of named in-memory buffers with per-entry read cursors.
///
/// The store is an explicit object: construct one at startup and pass it to
/// the code that reads assets. Mutating operations take `&mut self`, so
/// sharing across threads requires an external lock.
///
/// Lookup scans newest first, so the most recent entry for a name wins.
///
/// # Examples
///
/// ```
/// use asset_cache::store::VirtualStore;
///
/// let data = b"hello";
/// let mut store = VirtualStore::new();
/// store.persist("a", &data[..], false).unwrap();
///
/// let handle = store.open("a").unwrap();
/// let mut dest = [0u8; 5];
/// assert_eq!(store.read(&mut dest, 5, 1, handle).unwrap(), 1);
/// assert_eq!(&dest, b"hello");
/// ```
#[derive(Debug)]
pub struct VirtualStore<'a> {
    id: u64,
    entries: Vec<Entry<'a>>,
}

impl<'a> VirtualStore<'a> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: next_store_id(),
            entries: Vec::new(),
        }
    }

    /// Number of resident entries, shadowed ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been persisted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` iff an entry named `name` is present.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Registers `data` under `name` without copying borrowed bytes.
    ///
    /// With `force_overwrite` unset, an existing name is left untouched and
    /// [`PersistOutcome::Kept`] is returned. Otherwise a new entry with its
    /// cursor at 0 is added and shadows any older entry of the same name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NameTooLong`] or [`StoreError::InvalidName`] for
    /// a bad name, and [`StoreError::AllocationFailure`] if the store cannot
    /// grow.
    pub fn persist(
        &mut self,
        name: &str,
        data: impl Into<Cow<'a, [u8]>>,
        force_overwrite: bool,
    ) -> Result<PersistOutcome> {
        let entry_name = EntryName::new(name)?;
        let existed = self.exists(name);
        if existed && !force_overwrite {
            debug!(entry = name, "entry exists, keeping original");
            return Ok(PersistOutcome::Kept);
        }

        self.entries
            .try_reserve(1)
            .map_err(|_| StoreError::AllocationFailure {
                name: name.to_string(),
            })?;

        let entry = Entry::new(entry_name, data);
        debug!(
            entry = name,
            size = entry.size(),
            borrowed = entry.is_borrowed(),
            shadowing = existed,
            "stored entry"
        );
        self.entries.push(entry);
        Ok(PersistOutcome::Stored)
    }

    /// Opens `name`, rewinding its cursor.
    ///
    /// Returns `None` if no entry has that name. Opening an already open
    /// name returns the same handle and resets the shared cursor.
    pub fn open(&mut self, name: &str) -> Option<Handle> {
        let index = self.position(name)?;
        self.entries[index].rewind();
        trace!(entry = name, index, "opened entry");
        Some(Handle::new(self.id, index))
    }

    /// Closes a handle, rewinding its entry.
    ///
    /// The entry stays registered and can be opened again.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidHandle`] for a handle from another store.
    pub fn close(&mut self, handle: Handle) -> Result<()> {
        self.entry_mut(handle)?.rewind();
        Ok(())
    }

    /// Moves the cursor.
    ///
    /// No clamping is applied; a cursor outside the buffer makes the next
    /// read return zero elements. [`SeekOrigin::End`] subtracts `offset`
    /// from the size. Arithmetic saturates at the `i64` bounds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidHandle`] for a handle from another store.
    pub fn seek(&mut self, handle: Handle, offset: i64, origin: SeekOrigin) -> Result<()> {
        let entry = self.entry_mut(handle)?;
        let cursor = match origin {
            SeekOrigin::Start => offset,
            SeekOrigin::Current => entry.cursor().saturating_add(offset),
            SeekOrigin::End => i64::try_from(entry.size())
                .unwrap_or(i64::MAX)
                .saturating_sub(offset),
        };
        trace!(entry = %entry.name(), ?origin, offset, cursor, "seek");
        entry.set_cursor(cursor);
        Ok(())
    }

    /// Returns the cursor of the handle's entry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidHandle`] for a handle from another store.
    pub fn tell(&self, handle: Handle) -> Result<i64> {
        Ok(self.entry(handle)?.cursor())
    }

    /// Reads whole elements of `element_size` bytes into `dest`.
    ///
    /// Reads as many elements as fit in all of: `element_count`, the bytes
    /// left between cursor and end, and `dest`. An element is read when
    /// exactly `element_size` bytes remain. Returns the number of elements
    /// read and advances the cursor by the bytes copied.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidHandle`] for a handle from another store.
    pub fn read(
        &mut self,
        dest: &mut [u8],
        element_size: usize,
        element_count: usize,
        handle: Handle,
    ) -> Result<usize> {
        let entry = self.entry_mut(handle)?;
        if element_size == 0 {
            return Ok(0);
        }
        let elements = element_count
            .min(entry.remaining() / element_size)
            .min(dest.len() / element_size);
        let copied = entry.take_into(dest, elements * element_size);
        trace!(entry = %entry.name(), element_size, elements, copied, "read");
        Ok(elements)
    }

    /// Writing through the virtual path is not supported; always returns 0.
    pub const fn write(
        &mut self,
        _src: &[u8],
        _element_size: usize,
        _element_count: usize,
        _handle: Handle,
    ) -> usize {
        0
    }

    /// Rewinds the handle's entry. Unknown handles are ignored.
    pub fn rewind(&mut self, handle: Handle) {
        if let Ok(entry) = self.entry_mut(handle) {
            entry.rewind();
        }
    }

    /// Formatted output sink; discards the message and returns 0.
    pub fn formatted_output(&self, args: fmt::Arguments<'_>) -> usize {
        trace!(output = %args, "discarded formatted output");
        0
    }

    /// Returns the visible entry for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no entry has that name.
    pub fn get(&self, name: &str) -> Result<&Entry<'a>> {
        self.position(name)
            .map(|index| &self.entries[index])
            .ok_or_else(|| {
                StoreError::NotFound {
                    name: name.to_string(),
                }
                .into()
            })
    }

    /// Returns the entry behind a handle.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidHandle`] for a handle from another store.
    pub fn entry(&self, handle: Handle) -> Result<&Entry<'a>> {
        self.check(handle)
            .map(|index| &self.entries[index])
            .map_err(Into::into)
    }

    /// Borrows the handle's entry as a [`std::io::Read`] + [`std::io::Seek`]
    /// stream.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidHandle`] for a handle from another store.
    pub fn file(&mut self, handle: Handle) -> Result<VirtualFile<'_, 'a>> {
        self.check(handle)?;
        Ok(VirtualFile::new(self, handle))
    }

    /// Snapshots all entries, newest first, flagging shadowed ones.
    #[must_use]
    pub fn entries(&self) -> Vec<EntryInfo> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .rev()
            .map(|entry| {
                let shadowed = !seen.insert(entry.name().as_str());
                entry.info(shadowed)
            })
            .collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().rposition(|entry| *entry.name() == *name)
    }

    fn check(&self, handle: Handle) -> std::result::Result<usize, StoreError> {
        if handle.store() == self.id && handle.index() < self.entries.len() {
            Ok(handle.index())
        } else {
            Err(StoreError::InvalidHandle)
        }
    }

    fn entry_mut(&mut self, handle: Handle) -> std::result::Result<&mut Entry<'a>, StoreError> {
        let index = self.check(handle)?;
        Ok(&mut self.entries[index])
    }
}

impl Default for VirtualStore<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> AssetCache<'a> for VirtualStore<'a> {
    fn persist(
        &mut self,
        name: &str,
        data: Cow<'a, [u8]>,
        force_overwrite: bool,
    ) -> Result<PersistOutcome> {
        Self::persist(self, name, data, force_overwrite)
    }

    fn exists(&self, name: &str) -> bool {
        Self::exists(self, name)
    }
}
