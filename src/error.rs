//! Error types for asset-cache operations.
//!
//! This module provides the error hierarchy using `thiserror` for the
//! virtual store, the disk cache writer, and CLI commands.

use thiserror::Error;

/// Result type alias for asset-cache operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Virtual store errors (names, handles, allocation).
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// I/O errors (disk cache, asset loading).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

/// Errors raised by the in-memory virtual store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No entry is registered under the name.
    #[error("entry not found: {name}")]
    NotFound {
        /// Name that was looked up.
        name: String,
    },

    /// The store could not grow to hold another entry.
    #[error("failed to allocate entry: {name}")]
    AllocationFailure {
        /// Name of the entry being persisted.
        name: String,
    },

    /// The handle does not refer to an entry of this store.
    #[error("invalid handle")]
    InvalidHandle,

    /// Entry name exceeds the fixed maximum length.
    #[error("entry name too long: {name} ({len} bytes, max {max})")]
    NameTooLong {
        /// Offending name.
        name: String,
        /// Its length in bytes.
        len: usize,
        /// Maximum permitted length in bytes.
        max: usize,
    },

    /// Entry name contains a character that cannot be represented.
    #[error("invalid entry name: {reason}")]
    InvalidName {
        /// Why the name was rejected.
        reason: String,
    },
}

/// I/O-specific errors for file operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to open, write, or flush a file.
    #[error("failed to write file: {path}: {reason}")]
    WriteFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Memory mapping error.
    #[error("memory mapping failed: {path}: {reason}")]
    MmapFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Directory creation error.
    #[error("failed to create directory: {path}: {reason}")]
    DirectoryFailed {
        /// Path to the directory.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Path escapes the cache root.
    #[error("path traversal denied: {path}")]
    PathTraversal {
        /// Path that was denied.
        path: String,
    },

    /// Generic I/O error wrapper.
    #[error("I/O error: {0}")]
    Generic(String),
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::Generic(err.to_string()))
    }
}

impl From<StoreError> for std::io::Error {
    fn from(err: StoreError) -> Self {
        let kind = match err {
            StoreError::NotFound { .. } => std::io::ErrorKind::NotFound,
            StoreError::AllocationFailure { .. } => std::io::ErrorKind::OutOfMemory,
            StoreError::InvalidHandle
            | StoreError::NameTooLong { .. }
            | StoreError::InvalidName { .. } => std::io::ErrorKind::InvalidInput,
        };
        Self::new(kind, err)
    }
}
