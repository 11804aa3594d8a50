//! Domain types for the movie catalog with strong typing.
//!
//! This module provides type-safe wrappers for the catalog's identifiers.
//! It follows the Newtype pattern to prevent key mixing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// External natural key for a movie: the IMDb identifier.
///
/// This newtype wrapper keeps the catalog key from being confused with the
/// plain-integer cross-reference ids (TMDb, Trakt, MAL). The key is
/// immutable once a record has been created; both the snapshot feed and the
/// persisted store are reconciled on it.
///
/// # Examples
///
/// ```rust
/// use movarr::domain::ImdbId;
///
/// let id = ImdbId::new("tt0111161");
/// assert_eq!(id.as_str(), "tt0111161");
/// assert_eq!(id.to_string(), "tt0111161");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ImdbId(String);

impl ImdbId {
    /// Creates a new `ImdbId` from a raw string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id and returns the underlying `String`.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns true when the key carries no value at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ImdbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ImdbId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ImdbId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<ImdbId> for String {
    fn from(id: ImdbId) -> Self {
        id.0
    }
}

impl Serialize for ImdbId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ImdbId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = String::deserialize(deserializer)?;
        Ok(Self(id))
    }
}
