use crate::domain::ImdbId;
use crate::models::movie::MovieRecord;
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

/// Handle on the persisted movie table.
///
/// Opens the SQLite database, applies migrations, and exposes the record
/// operations through the movie repository.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.starts_with(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    pub async fn add_movie(&self, record: &MovieRecord) -> Result<()> {
        self.movie_repo().insert(record).await
    }

    pub async fn insert_new_movie(&self, record: &MovieRecord) -> Result<bool> {
        self.movie_repo().insert_new(record).await
    }

    pub async fn get_movie(&self, id: &ImdbId) -> Result<Option<MovieRecord>> {
        self.movie_repo().get(id).await
    }

    pub async fn movie_exists(&self, id: &ImdbId) -> Result<bool> {
        self.movie_repo().exists(id).await
    }

    pub async fn list_movies(&self) -> Result<Vec<MovieRecord>> {
        self.movie_repo().list().await
    }

    pub async fn update_movie(&self, record: &MovieRecord) -> Result<bool> {
        self.movie_repo().update(record).await
    }

    pub async fn remove_movie(&self, id: &ImdbId) -> Result<bool> {
        self.movie_repo().remove(id).await
    }

    pub async fn movie_count(&self) -> Result<u64> {
        self.movie_repo().count().await
    }
}
