//! Store implementations behind the [`MovieStore`] capability.
//!
//! `SeaOrmMovieStore` is the durable backend over the SQLite table.
//! `SnapshotMovieStore` keeps the legacy deployment alive: records live in
//! the snapshot document itself and every mutation rewrites the whole file.

use crate::db::Store;
use crate::domain::ImdbId;
use crate::models::movie::MovieRecord;
use crate::services::movie_store::{MovieStore, StoreError};
use crate::snapshot::SnapshotCatalog;
use tokio::sync::Mutex;

/// Returns true when a database error reports a violated unique constraint.
/// The table's primary key on the IMDb id is the only such constraint.
fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.to_string().to_uppercase().contains("UNIQUE")
}

/// Returns true when an update found its row but could not apply because the
/// row disappeared mid-write.
fn is_stale_update(err: &anyhow::Error) -> bool {
    err.to_string().starts_with("stale update")
}

/// `SeaORM`-backed implementation of [`MovieStore`].
pub struct SeaOrmMovieStore {
    store: Store,
}

impl SeaOrmMovieStore {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl MovieStore for SeaOrmMovieStore {
    async fn list(&self) -> Result<Vec<MovieRecord>, StoreError> {
        self.store.list_movies().await.map_err(StoreError::backend)
    }

    async fn get(&self, id: &ImdbId) -> Result<Option<MovieRecord>, StoreError> {
        self.store.get_movie(id).await.map_err(StoreError::backend)
    }

    async fn insert(&self, record: &MovieRecord) -> Result<(), StoreError> {
        if self
            .store
            .movie_exists(&record.imdb_id)
            .await
            .map_err(StoreError::backend)?
        {
            return Err(StoreError::Conflict(record.imdb_id.clone()));
        }

        // A concurrent insert can still slip between the check and the
        // write; the primary key turns that race into a conflict as well.
        self.store.add_movie(record).await.map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::Conflict(record.imdb_id.clone())
            } else {
                StoreError::backend(e)
            }
        })
    }

    async fn insert_new(&self, record: &MovieRecord) -> Result<bool, StoreError> {
        self.store
            .insert_new_movie(record)
            .await
            .map_err(StoreError::backend)
    }

    async fn update(&self, record: &MovieRecord) -> Result<(), StoreError> {
        match self.store.update_movie(record).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(StoreError::NotFound(record.imdb_id.clone())),
            Err(e) if is_stale_update(&e) => Err(StoreError::Stale(record.imdb_id.clone())),
            Err(e) => Err(StoreError::backend(e)),
        }
    }

    async fn remove(&self, id: &ImdbId) -> Result<(), StoreError> {
        let removed = self
            .store
            .remove_movie(id)
            .await
            .map_err(StoreError::backend)?;

        if removed {
            Ok(())
        } else {
            Err(StoreError::NotFound(id.clone()))
        }
    }
}

/// Legacy implementation of [`MovieStore`] keeping records directly in the
/// snapshot document.
///
/// Every mutation loads the whole document, applies the change, and writes
/// the document back. The lock serializes load-modify-write cycles within
/// this process; cross-process writers are not protected against.
pub struct SnapshotMovieStore {
    catalog: SnapshotCatalog,
    lock: Mutex<()>,
}

impl SnapshotMovieStore {
    #[must_use]
    pub fn new(catalog: SnapshotCatalog) -> Self {
        Self {
            catalog,
            lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<Vec<MovieRecord>, StoreError> {
        self.catalog.load().map_err(StoreError::backend)
    }

    fn save(&self, records: &[MovieRecord]) -> Result<(), StoreError> {
        self.catalog.save(records).map_err(StoreError::backend)
    }
}

#[async_trait::async_trait]
impl MovieStore for SnapshotMovieStore {
    async fn list(&self) -> Result<Vec<MovieRecord>, StoreError> {
        let _guard = self.lock.lock().await;
        self.load()
    }

    async fn get(&self, id: &ImdbId) -> Result<Option<MovieRecord>, StoreError> {
        let _guard = self.lock.lock().await;
        let records = self.load()?;
        Ok(records.into_iter().find(|r| r.imdb_id == *id))
    }

    async fn insert(&self, record: &MovieRecord) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load()?;

        if records.iter().any(|r| r.imdb_id == record.imdb_id) {
            return Err(StoreError::Conflict(record.imdb_id.clone()));
        }

        records.push(record.clone());
        self.save(&records)
    }

    async fn insert_new(&self, record: &MovieRecord) -> Result<bool, StoreError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load()?;

        if records.iter().any(|r| r.imdb_id == record.imdb_id) {
            return Ok(false);
        }

        records.push(record.clone());
        self.save(&records)?;
        Ok(true)
    }

    async fn update(&self, record: &MovieRecord) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load()?;

        let Some(existing) = records.iter_mut().find(|r| r.imdb_id == record.imdb_id) else {
            return Err(StoreError::NotFound(record.imdb_id.clone()));
        };

        existing.title = record.title.clone();
        existing.year = record.year;
        existing.score = record.score;
        existing.score_average = record.score_average;
        existing.category = record.category.clone();
        existing.tmdb_id = record.tmdb_id;
        existing.trakt_id = record.trakt_id;
        existing.mal_id = record.mal_id;

        self.save(&records)
    }

    async fn remove(&self, id: &ImdbId) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load()?;

        let before = records.len();
        records.retain(|r| r.imdb_id != *id);
        if records.len() == before {
            return Err(StoreError::NotFound(id.clone()));
        }

        self.save(&records)
    }
}
