//! Capability interface over the record store.
//!
//! The source system kept two near-duplicate controllers, one working
//! against the JSON file and one against the database table. This trait is
//! the seam that collapses them: the command surface and the reconciliation
//! engine are written once against [`MovieStore`], and the two backends are
//! picked by configuration.

use crate::domain::ImdbId;
use crate::models::movie::MovieRecord;
use thiserror::Error;

/// Failures of the record store capability.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("movie not found: {0}")]
    NotFound(ImdbId),

    #[error("movie already exists: {0}")]
    Conflict(ImdbId),

    #[error("stale update, movie changed underneath: {0}")]
    Stale(ImdbId),

    #[error("store error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Write/read capability over durable movie records.
///
/// Implementations must enforce key uniqueness so that concurrent inserts
/// racing on the same key resolve at the store rather than through
/// application-level locking.
#[async_trait::async_trait]
pub trait MovieStore: Send + Sync {
    /// All records currently in the store.
    async fn list(&self) -> Result<Vec<MovieRecord>, StoreError>;

    async fn get(&self, id: &ImdbId) -> Result<Option<MovieRecord>, StoreError>;

    /// Strict insert: a duplicate key is a [`StoreError::Conflict`].
    async fn insert(&self, record: &MovieRecord) -> Result<(), StoreError>;

    /// Import insert: a duplicate key is a benign no-op, not an error.
    /// Returns whether a record was actually written.
    async fn insert_new(&self, record: &MovieRecord) -> Result<bool, StoreError>;

    /// Replaces the mutable fields of an existing record; the key is fixed.
    /// Fails with [`StoreError::NotFound`] when no record has the key.
    async fn update(&self, record: &MovieRecord) -> Result<(), StoreError>;

    /// Removes the record with the given key. Fails with
    /// [`StoreError::NotFound`] when there is nothing to remove.
    async fn remove(&self, id: &ImdbId) -> Result<(), StoreError>;
}
