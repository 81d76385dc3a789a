//! I/O surfaces for asset-cache.
//!
//! Loading asset files from disk, a `std::io` stream over virtual entries,
//! and the C-library shaped compatibility functions.

pub mod compat;
pub mod file;
pub mod reader;

pub use file::VirtualFile;
pub use reader::{FileReader, read_asset};
