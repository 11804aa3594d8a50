use crate::domain::ImdbId;
use crate::entities::{movies, prelude::*};
use crate::models::movie::MovieRecord;
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};
use tracing::info;

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model_to_record(model: movies::Model) -> MovieRecord {
        MovieRecord {
            imdb_id: ImdbId::new(model.imdb_id),
            title: model.title,
            year: model.year,
            score: model.score,
            score_average: model.score_average,
            category: model.category,
            tmdb_id: model.tmdb_id,
            trakt_id: model.trakt_id,
            mal_id: model.mal_id,
            // Anything read back from the table is persisted by definition.
            is_saved: true,
        }
    }

    fn active_model(record: &MovieRecord) -> movies::ActiveModel {
        movies::ActiveModel {
            imdb_id: Set(record.imdb_id.as_str().to_string()),
            title: Set(record.title.clone()),
            year: Set(record.year),
            score: Set(record.score),
            score_average: Set(record.score_average),
            category: Set(record.category.clone()),
            tmdb_id: Set(record.tmdb_id),
            trakt_id: Set(record.trakt_id),
            mal_id: Set(record.mal_id),
            created_at: Set(Some(chrono::Utc::now().to_rfc3339())),
        }
    }

    /// Strict insert. A duplicate key surfaces as a database error for the
    /// caller to classify.
    pub async fn insert(&self, record: &MovieRecord) -> Result<()> {
        Movies::insert(Self::active_model(record))
            .exec_without_returning(&self.conn)
            .await?;

        info!("Added movie: {}", record.imdb_id);
        Ok(())
    }

    /// Import insert: leaves any existing row with the same key untouched.
    /// Returns true if a row was actually written.
    pub async fn insert_new(&self, record: &MovieRecord) -> Result<bool> {
        let written = Movies::insert(Self::active_model(record))
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(movies::Column::ImdbId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(written > 0)
    }

    pub async fn get(&self, id: &ImdbId) -> Result<Option<MovieRecord>> {
        let row = Movies::find_by_id(id.as_str()).one(&self.conn).await?;
        Ok(row.map(Self::map_model_to_record))
    }

    pub async fn exists(&self, id: &ImdbId) -> Result<bool> {
        let count = Movies::find_by_id(id.as_str()).count(&self.conn).await?;
        Ok(count > 0)
    }

    pub async fn list(&self) -> Result<Vec<MovieRecord>> {
        let rows = Movies::find()
            .order_by_asc(movies::Column::Title)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model_to_record).collect())
    }

    /// Replaces the mutable fields of the row with the record's key. The key
    /// and the creation timestamp stay fixed. Returns false when no such row
    /// exists.
    pub async fn update(&self, record: &MovieRecord) -> Result<bool> {
        let Some(existing) = Movies::find_by_id(record.imdb_id.as_str())
            .one(&self.conn)
            .await?
        else {
            return Ok(false);
        };

        let mut active: movies::ActiveModel = existing.into();
        active.title = Set(record.title.clone());
        active.year = Set(record.year);
        active.score = Set(record.score);
        active.score_average = Set(record.score_average);
        active.category = Set(record.category.clone());
        active.tmdb_id = Set(record.tmdb_id);
        active.trakt_id = Set(record.trakt_id);
        active.mal_id = Set(record.mal_id);

        match Movies::update(active).exec(&self.conn).await {
            Ok(_) => {}
            // The row vanished between the read and the write.
            Err(sea_orm::DbErr::RecordNotUpdated) => {
                anyhow::bail!("stale update: {}", record.imdb_id)
            }
            Err(err) => return Err(err.into()),
        }

        info!("Updated movie: {}", record.imdb_id);
        Ok(true)
    }

    /// Removes the row with the given key. Returns false when nothing was
    /// deleted.
    pub async fn remove(&self, id: &ImdbId) -> Result<bool> {
        let result = Movies::delete_by_id(id.as_str()).exec(&self.conn).await?;

        if result.rows_affected > 0 {
            info!("Removed movie: {}", id);
        }
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        let count = Movies::find().count(&self.conn).await?;
        Ok(count)
    }
}
