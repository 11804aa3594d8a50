use crate::domain::ImdbId;
use serde::{Deserialize, Serialize};

/// A catalog entry, shared between the snapshot feed and the persisted store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub imdb_id: ImdbId,
    pub title: String,
    pub year: Option<i32>,
    pub score: Option<f32>,
    pub score_average: Option<f32>,
    /// Catalog classification, e.g. "movie" or "series". The snapshot feed
    /// calls this field `type`.
    pub category: String,
    pub tmdb_id: Option<i32>,
    pub trakt_id: Option<i32>,
    pub mal_id: Option<i32>,
    /// True iff the record already exists in the persisted store. Derived
    /// during reconciliation; never persisted anywhere.
    #[serde(default, skip_serializing)]
    pub is_saved: bool,
}

/// Incoming payload for create and edit operations.
///
/// Carries exactly the mutable field set plus the key; the transient
/// `is_saved` flag is not part of the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDraft {
    pub imdb_id: ImdbId,
    pub title: String,
    pub year: Option<i32>,
    pub score: Option<f32>,
    pub score_average: Option<f32>,
    pub category: String,
    pub tmdb_id: Option<i32>,
    pub trakt_id: Option<i32>,
    pub mal_id: Option<i32>,
}

impl MovieDraft {
    /// Converts the payload into a record that is not yet persisted.
    #[must_use]
    pub fn into_record(self) -> MovieRecord {
        MovieRecord {
            imdb_id: self.imdb_id,
            title: self.title,
            year: self.year,
            score: self.score,
            score_average: self.score_average,
            category: self.category,
            tmdb_id: self.tmdb_id,
            trakt_id: self.trakt_id,
            mal_id: self.mal_id,
            is_saved: false,
        }
    }
}

impl From<MovieRecord> for MovieDraft {
    fn from(record: MovieRecord) -> Self {
        Self {
            imdb_id: record.imdb_id,
            title: record.title,
            year: record.year,
            score: record.score,
            score_average: record.score_average,
            category: record.category,
            tmdb_id: record.tmdb_id,
            trakt_id: record.trakt_id,
            mal_id: record.mal_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> MovieDraft {
        MovieDraft {
            imdb_id: ImdbId::new("tt0111161"),
            title: "The Shawshank Redemption".to_string(),
            year: Some(1994),
            score: Some(9.3),
            score_average: Some(9.1),
            category: "movie".to_string(),
            tmdb_id: Some(278),
            trakt_id: None,
            mal_id: None,
        }
    }

    #[test]
    fn draft_into_record_is_not_saved() {
        let record = draft().into_record();
        assert!(!record.is_saved);
        assert_eq!(record.imdb_id.as_str(), "tt0111161");
        assert_eq!(record.year, Some(1994));
    }

    #[test]
    fn draft_record_round_trip() {
        let original = draft();
        let round_tripped = MovieDraft::from(original.clone().into_record());
        assert_eq!(round_tripped, original);
    }

    #[test]
    fn is_saved_is_transient_in_json() {
        let mut record = draft().into_record();
        record.is_saved = true;
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("is_saved"));

        let parsed: MovieRecord = serde_json::from_str(&json).unwrap();
        assert!(!parsed.is_saved);
    }
}
