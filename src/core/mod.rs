//! Core domain types for asset-cache.
//!
//! Entries, their names, and the handles used to read them. These types
//! carry no I/O dependencies.

pub mod entry;
pub mod handle;
pub mod name;

pub use entry::{Entry, EntryInfo};
pub use handle::{Handle, SeekOrigin};
pub use name::{EntryName, MAX_NAME_LEN};
