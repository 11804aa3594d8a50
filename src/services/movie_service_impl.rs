//! Default implementation of the [`MovieService`] trait.
//!
//! The implementation is written once against the [`MovieStore`] capability;
//! whether it runs over the SQLite table or over the legacy snapshot file is
//! decided by whichever store it is constructed with.

use crate::domain::ImdbId;
use crate::models::movie::{MovieDraft, MovieRecord};
use crate::services::movie_service::{MovieError, MovieService, validate_draft};
use crate::services::movie_store::MovieStore;
use crate::services::reconcile::{MovieSource, ReconcileEngine, ReconcileStats};
use std::sync::Arc;
use tracing::info;

pub struct DefaultMovieService {
    store: Arc<dyn MovieStore>,
    reconciler: ReconcileEngine,
}

impl DefaultMovieService {
    #[must_use]
    pub fn new(source: Arc<dyn MovieSource>, store: Arc<dyn MovieStore>) -> Self {
        Self {
            reconciler: ReconcileEngine::new(source, Arc::clone(&store)),
            store,
        }
    }

    /// Runs one reconciliation pass without assembling the display list.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`MovieService::list`].
    pub async fn import(&self) -> Result<ReconcileStats, MovieError> {
        let outcome = self.reconciler.reconcile().await?;
        Ok(outcome.stats)
    }
}

#[async_trait::async_trait]
impl MovieService for DefaultMovieService {
    async fn list(&self) -> Result<Vec<MovieRecord>, MovieError> {
        let outcome = self.reconciler.reconcile().await?;
        Ok(outcome.movies)
    }

    async fn get(&self, id: &ImdbId) -> Result<MovieRecord, MovieError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| MovieError::NotFound(id.clone()))
    }

    async fn create(&self, draft: MovieDraft) -> Result<MovieRecord, MovieError> {
        validate_draft(&draft)?;

        let mut record = draft.into_record();
        self.store.insert(&record).await?;

        info!("Created movie {}", record.imdb_id);
        record.is_saved = true;
        Ok(record)
    }

    async fn update(&self, id: &ImdbId, draft: MovieDraft) -> Result<MovieRecord, MovieError> {
        if draft.imdb_id != *id {
            return Err(MovieError::Validation(format!(
                "key mismatch: path says {id}, payload says {}",
                draft.imdb_id
            )));
        }
        validate_draft(&draft)?;

        let mut record = draft.into_record();
        self.store.update(&record).await?;

        info!("Updated movie {}", record.imdb_id);
        record.is_saved = true;
        Ok(record)
    }

    async fn delete(&self, id: &ImdbId) -> Result<(), MovieError> {
        self.store.remove(id).await?;

        info!("Deleted movie {}", id);
        Ok(())
    }
}
