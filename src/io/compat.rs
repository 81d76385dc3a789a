//! C-library shaped access to a virtual store.
//!
//! Legacy readers written against `fopen`/`fread`/`fseek` can be pointed at
//! these functions with the same argument order. A nullable stream is an
//! `Option<Handle>`; failures are reported through the usual sentinels
//! instead of `Result`.
//!
//! | call      | failure value |
//! |-----------|---------------|
//! | `fopen`   | `None`        |
//! | `fclose`  | `-1`          |
//! | `fseek`   | `-1`          |
//! | `ftell`   | `0`           |
//! | `fread`   | `0`           |

use crate::core::{Handle, SeekOrigin};
use crate::store::{AssetCache, VirtualStore};
use std::borrow::Cow;
use std::fmt;
use tracing::warn;

/// C `SEEK_SET`.
pub const SEEK_SET: i32 = 0;
/// C `SEEK_CUR`.
pub const SEEK_CUR: i32 = 1;
/// C `SEEK_END`.
pub const SEEK_END: i32 = 2;

/// Registers `contents` under `path`; returns `true` on success.
///
/// Works with either backend. An existing entry without `force_overwrite`
/// counts as success.
pub fn save_to_cache<'a, C>(
    cache: &mut C,
    path: &str,
    contents: impl Into<Cow<'a, [u8]>>,
    force_overwrite: bool,
) -> bool
where
    C: AssetCache<'a> + ?Sized,
{
    match cache.persist(path, contents.into(), force_overwrite) {
        Ok(_) => true,
        Err(e) => {
            warn!(path, error = %e, "save_to_cache failed");
            false
        }
    }
}

/// Returns `true` if `path` has been saved.
pub fn file_exists<'a, C>(cache: &C, path: &str) -> bool
where
    C: AssetCache<'a> + ?Sized,
{
    cache.exists(path)
}

/// Opens `filename`; the mode is ignored since entries are read-only.
pub fn fopen(store: &mut VirtualStore<'_>, filename: &str, _mode: &str) -> Option<Handle> {
    store.open(filename)
}

/// Closes a stream: 0 on success, -1 for a null or foreign stream.
pub fn fclose(store: &mut VirtualStore<'_>, stream: Option<Handle>) -> i32 {
    match stream.map(|handle| store.close(handle)) {
        Some(Ok(())) => 0,
        _ => -1,
    }
}

/// Seeks with a C origin constant: 0 on success, -1 otherwise.
///
/// `SEEK_END` subtracts `offset` from the size.
pub fn fseek(store: &mut VirtualStore<'_>, stream: Option<Handle>, offset: i64, origin: i32) -> i32 {
    let (Some(handle), Some(origin)) = (stream, SeekOrigin::from_whence(origin)) else {
        return -1;
    };
    match store.seek(handle, offset, origin) {
        Ok(()) => 0,
        Err(_) => -1,
    }
}

/// Returns the cursor, or 0 for a null or foreign stream.
pub fn ftell(store: &VirtualStore<'_>, stream: Option<Handle>) -> i64 {
    stream
        .and_then(|handle| store.tell(handle).ok())
        .unwrap_or(0)
}

/// Reads up to `count` elements of `size` bytes; 0 for a null stream.
pub fn fread(
    ptr: &mut [u8],
    size: usize,
    count: usize,
    store: &mut VirtualStore<'_>,
    stream: Option<Handle>,
) -> usize {
    stream
        .and_then(|handle| store.read(ptr, size, count, handle).ok())
        .unwrap_or(0)
}

/// Writing is not supported; always 0.
pub const fn fwrite(
    _ptr: &[u8],
    _size: usize,
    _count: usize,
    _store: &mut VirtualStore<'_>,
    _stream: Option<Handle>,
) -> usize {
    0
}

/// Rewinds a stream; null streams are ignored.
pub fn rewind(store: &mut VirtualStore<'_>, stream: Option<Handle>) {
    if let Some(handle) = stream {
        store.rewind(handle);
    }
}

/// Formatted output stub; always 0.
pub fn printf(store: &VirtualStore<'_>, args: fmt::Arguments<'_>) -> i32 {
    i32::try_from(store.formatted_output(args)).unwrap_or(0)
}
