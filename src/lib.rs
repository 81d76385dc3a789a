//! # asset-cache
//!
//! A minimal virtual file layer for embedded assets.
//!
//! Embedding code registers named byte buffers once at startup; legacy
//! file-oriented readers then open, seek, and read them as if they came
//! from disk. Hosts with a real filesystem can link the disk-backed persist
//! instead and read the files through `std::fs`.
//!
//! ## Features
//!
//! - **Virtual store**: named buffers referenced without copying, with a
//!   shared read cursor per entry
//! - **Sequential access**: open/seek/tell/read/rewind/close, plus a
//!   `std::io::Read` + `Seek` adapter and C-library shaped functions
//! - **Disk cache**: the same persist contract backed by real files
//!
//! ```
//! use asset_cache::store::VirtualStore;
//! use asset_cache::SeekOrigin;
//!
//! let table = [1u8, 2, 3, 4, 5, 6, 7, 8];
//! let mut store = VirtualStore::new();
//! store.persist("table.bin", &table[..], false).unwrap();
//!
//! let handle = store.open("table.bin").unwrap();
//! store.seek(handle, 4, SeekOrigin::Start).unwrap();
//! let mut word = [0u8; 4];
//! assert_eq!(store.read(&mut word, 4, 1, handle).unwrap(), 1);
//! assert_eq!(word, [5, 6, 7, 8]);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
// Note: unsafe is needed for memory-mapped I/O (memmap2)
#![warn(unsafe_code)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod store;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use core::{Entry, EntryInfo, EntryName, Handle, MAX_NAME_LEN, SeekOrigin};

// Re-export store types
pub use store::{
    AssetCache, DEFAULT_CACHE_DIR, DefaultCache, DiskCache, PersistOutcome, VirtualStore,
    default_cache,
};

// Re-export I/O types
pub use io::{FileReader, VirtualFile, read_asset};

// Re-export configuration
pub use config::CacheConfig;

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
