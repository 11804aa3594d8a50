//! Domain service for the movie command surface.
//!
//! This module provides the domain layer abstraction over the record store
//! and the reconciliation engine, keeping presentation concerns out of the
//! catalog logic.

use crate::domain::ImdbId;
use crate::models::movie::{MovieDraft, MovieRecord};
use crate::services::movie_store::StoreError;
use crate::services::reconcile::ReconcileError;
use crate::snapshot::SnapshotError;
use thiserror::Error;

/// Upper bound for the key and the text fields, matching the store schema.
pub const MAX_FIELD_LEN: usize = 255;

/// Domain errors for movie operations.
#[derive(Debug, Error)]
pub enum MovieError {
    #[error("movie not found: {0}")]
    NotFound(ImdbId),

    #[error("movie already exists: {0}")]
    Conflict(ImdbId),

    #[error("invalid movie data: {0}")]
    Validation(String),

    #[error("concurrent modification of movie: {0}")]
    Concurrency(ImdbId),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("store error: {0}")]
    Store(String),
}

impl From<StoreError> for MovieError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            StoreError::Conflict(id) => Self::Conflict(id),
            StoreError::Stale(id) => Self::Concurrency(id),
            StoreError::Backend(msg) => Self::Store(msg),
        }
    }
}

impl From<ReconcileError> for MovieError {
    fn from(err: ReconcileError) -> Self {
        match err {
            ReconcileError::Snapshot(e) => Self::Snapshot(e),
            ReconcileError::Store(e) => e.into(),
        }
    }
}

pub fn validate_imdb_id(id: &ImdbId) -> Result<(), MovieError> {
    if id.is_empty() {
        return Err(MovieError::Validation(
            "IMDb id cannot be empty".to_string(),
        ));
    }
    if id.as_str().len() > MAX_FIELD_LEN {
        return Err(MovieError::Validation(format!(
            "IMDb id must be {MAX_FIELD_LEN} characters or less"
        )));
    }
    Ok(())
}

/// Checks an incoming payload before any side effect: required fields
/// present, text fields within the schema bound.
pub fn validate_draft(draft: &MovieDraft) -> Result<(), MovieError> {
    validate_imdb_id(&draft.imdb_id)?;

    if draft.title.trim().is_empty() {
        return Err(MovieError::Validation("title cannot be empty".to_string()));
    }
    if draft.title.len() > MAX_FIELD_LEN {
        return Err(MovieError::Validation(format!(
            "title must be {MAX_FIELD_LEN} characters or less"
        )));
    }

    if draft.category.trim().is_empty() {
        return Err(MovieError::Validation(
            "category cannot be empty".to_string(),
        ));
    }
    if draft.category.len() > MAX_FIELD_LEN {
        return Err(MovieError::Validation(format!(
            "category must be {MAX_FIELD_LEN} characters or less"
        )));
    }

    Ok(())
}

/// Domain service trait for the movie command surface.
///
/// All operations are keyed by [`ImdbId`]. Mutating operations validate
/// before touching the store and never partially apply.
#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    /// Returns the reconciled, annotated union of the snapshot feed and the
    /// record store, importing feed records the store has never seen.
    ///
    /// # Errors
    ///
    /// - Returns [`MovieError::Snapshot`] when the feed cannot be loaded;
    ///   no partial catalog is returned in that case.
    /// - Returns [`MovieError::Store`] when the persisted set cannot be read.
    async fn list(&self) -> Result<Vec<MovieRecord>, MovieError>;

    /// Retrieves one record from the store.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] when no record has the key.
    async fn get(&self, id: &ImdbId) -> Result<MovieRecord, MovieError>;

    /// Inserts a new record and returns it as stored.
    ///
    /// # Errors
    ///
    /// - Returns [`MovieError::Validation`] when the payload is invalid.
    /// - Returns [`MovieError::Conflict`] when the key already exists.
    async fn create(&self, draft: MovieDraft) -> Result<MovieRecord, MovieError>;

    /// Replaces the mutable fields of an existing record; the key is fixed.
    ///
    /// # Errors
    ///
    /// - Returns [`MovieError::Validation`] when the path key and the
    ///   payload key disagree, or when the payload is invalid.
    /// - Returns [`MovieError::NotFound`] when no record has the key.
    /// - Returns [`MovieError::Concurrency`] when the record is removed by
    ///   another writer mid-update.
    async fn update(&self, id: &ImdbId, draft: MovieDraft) -> Result<MovieRecord, MovieError>;

    /// Removes the record with the given key.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] when there is nothing to remove.
    async fn delete(&self, id: &ImdbId) -> Result<(), MovieError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> MovieDraft {
        MovieDraft {
            imdb_id: ImdbId::new("tt1"),
            title: "A".to_string(),
            year: Some(2001),
            score: None,
            score_average: None,
            category: "movie".to_string(),
            tmdb_id: None,
            trakt_id: None,
            mal_id: None,
        }
    }

    #[test]
    fn validate_draft_accepts_valid_payload() {
        assert!(validate_draft(&draft()).is_ok());
    }

    #[test]
    fn validate_draft_rejects_empty_key() {
        let mut d = draft();
        d.imdb_id = ImdbId::default();
        assert!(matches!(
            validate_draft(&d),
            Err(MovieError::Validation(_))
        ));
    }

    #[test]
    fn validate_draft_rejects_blank_title() {
        let mut d = draft();
        d.title = "   ".to_string();
        assert!(matches!(
            validate_draft(&d),
            Err(MovieError::Validation(_))
        ));
    }

    #[test]
    fn validate_draft_rejects_overlong_title() {
        let mut d = draft();
        d.title = "a".repeat(MAX_FIELD_LEN + 1);
        assert!(matches!(
            validate_draft(&d),
            Err(MovieError::Validation(_))
        ));
    }

    #[test]
    fn validate_draft_rejects_missing_category() {
        let mut d = draft();
        d.category = String::new();
        assert!(matches!(
            validate_draft(&d),
            Err(MovieError::Validation(_))
        ));
    }

    #[test]
    fn movie_error_display() {
        let err = MovieError::NotFound(ImdbId::new("tt42"));
        assert_eq!(err.to_string(), "movie not found: tt42");

        let err = MovieError::Conflict(ImdbId::new("tt42"));
        assert_eq!(err.to_string(), "movie already exists: tt42");
    }

    #[test]
    fn store_errors_map_to_domain_errors() {
        let err: MovieError = StoreError::NotFound(ImdbId::new("tt1")).into();
        assert!(matches!(err, MovieError::NotFound(_)));

        let err: MovieError = StoreError::Conflict(ImdbId::new("tt1")).into();
        assert!(matches!(err, MovieError::Conflict(_)));

        let err: MovieError = StoreError::Stale(ImdbId::new("tt1")).into();
        assert!(matches!(err, MovieError::Concurrency(_)));

        let err: MovieError = StoreError::backend("boom").into();
        assert!(matches!(err, MovieError::Store(_)));
    }
}
