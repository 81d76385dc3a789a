//! `std::io` adapter over a virtual store entry.

use crate::core::{Handle, SeekOrigin};
use crate::store::VirtualStore;
use std::io::{self, Read, Seek, SeekFrom};

/// An open entry viewed as a [`Read`] + [`Seek`] stream.
///
/// Reads and seeks move the entry's shared cursor, exactly like the store's
/// own [`read`](VirtualStore::read) and [`seek`](VirtualStore::seek).
/// [`SeekFrom`] keeps its standard meaning, so `SeekFrom::End(n)` lands at
/// `size + n`, and seeking before the start is an error.
///
/// # Examples
///
/// ```
/// use asset_cache::store::VirtualStore;
/// use std::io::Read;
///
/// let data = b"hello";
/// let mut store = VirtualStore::new();
/// store.persist("a", &data[..], false).unwrap();
/// let handle = store.open("a").unwrap();
///
/// let mut out = String::new();
/// store.file(handle).unwrap().read_to_string(&mut out).unwrap();
/// assert_eq!(out, "hello");
/// ```
#[derive(Debug)]
pub struct VirtualFile<'s, 'a> {
    store: &'s mut VirtualStore<'a>,
    handle: Handle,
}

impl<'s, 'a> VirtualFile<'s, 'a> {
    pub(crate) const fn new(store: &'s mut VirtualStore<'a>, handle: Handle) -> Self {
        Self { store, handle }
    }

    /// Returns the handle this stream reads through.
    #[must_use]
    pub const fn handle(&self) -> Handle {
        self.handle
    }
}

impl Read for VirtualFile<'_, '_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = buf.len();
        self.store.read(buf, 1, len, self.handle).map_err(store_err)
    }
}

impl Seek for VirtualFile<'_, '_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let entry = self.store.entry(self.handle).map_err(store_err)?;
        let size = i64::try_from(entry.size()).map_err(|_| invalid_seek())?;
        let target = match pos {
            SeekFrom::Start(offset) => i64::try_from(offset).ok(),
            SeekFrom::Current(offset) => entry.cursor().checked_add(offset),
            SeekFrom::End(offset) => size.checked_add(offset),
        }
        .filter(|target| *target >= 0)
        .ok_or_else(invalid_seek)?;

        self.store
            .seek(self.handle, target, SeekOrigin::Start)
            .map_err(store_err)?;
        u64::try_from(target).map_err(|_| invalid_seek())
    }
}

fn store_err(err: crate::Error) -> io::Error {
    match err {
        crate::Error::Store(store) => store.into(),
        other => io::Error::other(other.to_string()),
    }
}

fn invalid_seek() -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        "invalid seek to a negative or overflowing position",
    )
}
