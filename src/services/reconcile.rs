//! Merge-and-import between the snapshot feed and the record store.
//!
//! On every listing the engine loads the feed, compares it with the store
//! by natural key, imports feed records the store has never seen, and
//! returns the annotated union for display. Records already in the store
//! always win over their feed copy; import never updates existing rows.

use crate::domain::ImdbId;
use crate::models::movie::MovieRecord;
use crate::services::movie_store::{MovieStore, StoreError};
use crate::snapshot::SnapshotError;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Read capability over the external feed.
#[async_trait::async_trait]
pub trait MovieSource: Send + Sync {
    async fn load_catalog(&self) -> Result<Vec<MovieRecord>, SnapshotError>;
}

/// Failures that abort a reconciliation run.
///
/// Per-record import failures do not appear here; they are logged and
/// skipped so one bad row cannot block the rest of the listing.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of the pure merge computation.
#[derive(Debug, Clone, PartialEq)]
pub struct MergePlan {
    /// The display union: every persisted record plus every feed-only
    /// record, annotated with `is_saved`.
    pub movies: Vec<MovieRecord>,
    /// Feed records whose key the store has never seen, queued for import.
    pub to_insert: Vec<MovieRecord>,
}

/// Computes the merge of feed records into the persisted set.
///
/// Persisted records win on key collision: their fields are displayed
/// unchanged and the feed copy is discarded. Feed records with an unknown
/// key are queued for insertion and shown with `is_saved = false`. Repeated
/// keys within the feed itself collapse to their first occurrence.
///
/// # Examples
///
/// ```
/// use movarr::domain::ImdbId;
/// use movarr::models::movie::MovieDraft;
/// use movarr::services::reconcile::plan_merge;
///
/// let feed = vec![MovieDraft {
///     imdb_id: ImdbId::new("tt1"),
///     title: "A".to_string(),
///     year: Some(2001),
///     score: None,
///     score_average: None,
///     category: "movie".to_string(),
///     tmdb_id: None,
///     trakt_id: None,
///     mal_id: None,
/// }
/// .into_record()];
///
/// let plan = plan_merge(feed, Vec::new());
/// assert_eq!(plan.to_insert.len(), 1);
/// assert!(!plan.movies[0].is_saved);
/// ```
#[must_use]
pub fn plan_merge(snapshot: Vec<MovieRecord>, persisted: Vec<MovieRecord>) -> MergePlan {
    let known: HashSet<ImdbId> = persisted.iter().map(|m| m.imdb_id.clone()).collect();

    let mut movies: Vec<MovieRecord> = persisted
        .into_iter()
        .map(|mut m| {
            m.is_saved = true;
            m
        })
        .collect();

    let mut to_insert = Vec::new();
    let mut queued: HashSet<ImdbId> = HashSet::new();

    for mut record in snapshot {
        if known.contains(&record.imdb_id) || queued.contains(&record.imdb_id) {
            continue;
        }
        record.is_saved = false;
        queued.insert(record.imdb_id.clone());
        movies.push(record.clone());
        to_insert.push(record);
    }

    MergePlan { movies, to_insert }
}

/// Counters for one reconciliation run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileStats {
    pub inserted: usize,
    pub skipped: usize,
}

/// Result of one reconciliation run: the annotated display union plus the
/// import counters.
#[derive(Debug)]
pub struct ReconcileOutcome {
    pub movies: Vec<MovieRecord>,
    pub stats: ReconcileStats,
}

/// Drives load → merge → import → annotate over a source and a store.
pub struct ReconcileEngine {
    source: Arc<dyn MovieSource>,
    store: Arc<dyn MovieStore>,
}

impl ReconcileEngine {
    #[must_use]
    pub fn new(source: Arc<dyn MovieSource>, store: Arc<dyn MovieStore>) -> Self {
        Self { source, store }
    }

    /// Loads the feed and the persisted set, imports unknown feed records,
    /// and returns the annotated union.
    ///
    /// A feed load failure aborts the whole run. A failed import of a
    /// single record is logged and skipped; a duplicate key reported by the
    /// store means another writer imported the record first and counts as a
    /// skip, not an error.
    pub async fn reconcile(&self) -> Result<ReconcileOutcome, ReconcileError> {
        let snapshot = self.source.load_catalog().await?;
        let persisted = self.store.list().await?;

        let plan = plan_merge(snapshot, persisted);

        let mut stats = ReconcileStats::default();
        for record in &plan.to_insert {
            match self.store.insert_new(record).await {
                Ok(true) => stats.inserted += 1,
                Ok(false) => stats.skipped += 1,
                Err(err) => {
                    stats.skipped += 1;
                    warn!("Skipping import of {}: {}", record.imdb_id, err);
                }
            }
        }

        if stats.inserted > 0 || stats.skipped > 0 {
            info!(
                inserted = stats.inserted,
                skipped = stats.skipped,
                "Imported snapshot records"
            );
        }

        Ok(ReconcileOutcome {
            movies: plan.movies,
            stats,
        })
    }
}
