//! Flat-file snapshot catalog reader/writer.
//!
//! The snapshot is a UTF-8 JSON document of the form `{"search": [...]}`,
//! produced by an external feed. The database-backed deployment only ever
//! imports from it; the legacy snapshot-backed store additionally rewrites
//! the whole file on mutation. Concurrent writers are not protected
//! against — callers needing strict consistency must serialize access.

use crate::domain::ImdbId;
use crate::models::movie::MovieRecord;
use crate::services::reconcile::MovieSource;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Failures of the snapshot file layer.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("malformed snapshot: {0}")]
    Format(String),

    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Wire shape of the snapshot document.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotRoot {
    search: Vec<SnapshotEntry>,
}

/// One feed entry.
///
/// The feed omits keys it has no data for; absent fields collapse to their
/// type's zero value (empty string, 0, 0.0). That lenient-parse policy is
/// deliberate — only a missing `search` array or a field of the wrong type
/// is a format error.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct SnapshotEntry {
    imdbid: String,
    title: String,
    year: i32,
    score: f32,
    score_average: f32,
    #[serde(rename = "type")]
    category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tmdbid: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    traktid: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    malid: Option<i32>,
}

impl From<SnapshotEntry> for MovieRecord {
    fn from(entry: SnapshotEntry) -> Self {
        Self {
            imdb_id: ImdbId::new(entry.imdbid),
            title: entry.title,
            year: Some(entry.year),
            score: Some(entry.score),
            score_average: Some(entry.score_average),
            category: entry.category,
            tmdb_id: entry.tmdbid,
            trakt_id: entry.traktid,
            mal_id: entry.malid,
            is_saved: false,
        }
    }
}

impl From<&MovieRecord> for SnapshotEntry {
    fn from(record: &MovieRecord) -> Self {
        Self {
            imdbid: record.imdb_id.as_str().to_string(),
            title: record.title.clone(),
            year: record.year.unwrap_or(0),
            score: record.score.unwrap_or(0.0),
            score_average: record.score_average.unwrap_or(0.0),
            category: record.category.clone(),
            tmdbid: record.tmdb_id,
            traktid: record.trakt_id,
            malid: record.mal_id,
        }
    }
}

/// Handle on one snapshot document.
///
/// The path comes in through the constructor; there is no ambient lookup of
/// a content root.
#[derive(Debug, Clone)]
pub struct SnapshotCatalog {
    path: PathBuf,
}

impl SnapshotCatalog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every record from the snapshot document.
    ///
    /// # Errors
    ///
    /// - [`SnapshotError::NotFound`] when the backing file is absent
    /// - [`SnapshotError::Format`] when the document is not JSON, lacks the
    ///   `search` array, or an element does not parse into the field set
    /// - [`SnapshotError::Io`] when the file cannot be read
    pub fn load(&self) -> Result<Vec<MovieRecord>, SnapshotError> {
        if !self.path.exists() {
            return Err(SnapshotError::NotFound {
                path: self.path.clone(),
            });
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let root: SnapshotRoot =
            serde_json::from_str(&contents).map_err(|e| SnapshotError::Format(e.to_string()))?;

        debug!(
            path = %self.path.display(),
            records = root.search.len(),
            "Loaded snapshot"
        );

        Ok(root.search.into_iter().map(Into::into).collect())
    }

    /// Replaces the whole snapshot document with the given records.
    ///
    /// The document is written to a sibling temp file and renamed over the
    /// original, so readers never observe a partial write.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Io`] when the file cannot be written.
    pub fn save(&self, records: &[MovieRecord]) -> Result<(), SnapshotError> {
        let root = SnapshotRoot {
            search: records.iter().map(Into::into).collect(),
        };
        let json =
            serde_json::to_string_pretty(&root).map_err(|e| SnapshotError::Format(e.to_string()))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;

        debug!(
            path = %self.path.display(),
            records = records.len(),
            "Saved snapshot"
        );

        Ok(())
    }
}

#[async_trait::async_trait]
impl MovieSource for SnapshotCatalog {
    async fn load_catalog(&self) -> Result<Vec<MovieRecord>, SnapshotError> {
        self.load()
    }
}
