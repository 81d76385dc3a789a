//! Bounded entry names.

use crate::error::StoreError;
use serde::{Serialize, Serializer};
use std::fmt;

/// Maximum entry name length in bytes.
///
/// Entry names were historically stored in a 32-byte field with a trailing
/// terminator, which leaves 31 usable bytes.
pub const MAX_NAME_LEN: usize = 31;

/// A validated entry name.
///
/// Construction checks the length bound and rejects interior NUL bytes,
/// so a name can always be handed to code expecting a C string.
///
/// # Examples
///
/// ```
/// use asset_cache::core::EntryName;
///
/// let name = EntryName::new("seas_18.se1").unwrap();
/// assert_eq!(name.as_str(), "seas_18.se1");
/// assert!(EntryName::new(&"x".repeat(32)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryName(String);

impl EntryName {
    /// Validates and wraps a name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NameTooLong`] when `name` exceeds
    /// [`MAX_NAME_LEN`] bytes and [`StoreError::InvalidName`] when it
    /// contains a NUL byte.
    pub fn new(name: &str) -> Result<Self, StoreError> {
        if name.len() > MAX_NAME_LEN {
            return Err(StoreError::NameTooLong {
                name: name.to_string(),
                len: name.len(),
                max: MAX_NAME_LEN,
            });
        }
        if name.contains('\0') {
            return Err(StoreError::InvalidName {
                reason: "name contains a NUL byte".to_string(),
            });
        }
        Ok(Self(name.to_string()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl AsRef<str> for EntryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for EntryName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl TryFrom<&str> for EntryName {
    type Error = StoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Serialize for EntryName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
