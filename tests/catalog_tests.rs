//! End-to-end tests for the database-backed catalog: reconciliation on
//! listing plus the full command surface.

use movarr::db::Store;
use movarr::domain::ImdbId;
use movarr::models::movie::MovieDraft;
use movarr::services::{
    DefaultMovieService, MovieError, MovieService, SeaOrmMovieStore,
};
use movarr::snapshot::{SnapshotCatalog, SnapshotError};
use std::path::PathBuf;
use std::sync::Arc;

fn temp_path(kind: &str, ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!("movarr-{kind}-{}.{ext}", uuid::Uuid::new_v4()))
}

/// Builds a service over a fresh temp database and the given snapshot
/// document. Returns the store handle for direct assertions against the
/// table.
async fn spawn_service(snapshot_json: &str) -> (DefaultMovieService, Store) {
    let snapshot_path = temp_path("snapshot", "json");
    std::fs::write(&snapshot_path, snapshot_json).expect("failed to write snapshot");

    let db_path = temp_path("db", "db");
    let store = Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to open test database");

    let service = DefaultMovieService::new(
        Arc::new(SnapshotCatalog::new(&snapshot_path)),
        Arc::new(SeaOrmMovieStore::new(store.clone())),
    );

    (service, store)
}

fn draft(id: &str, title: &str) -> MovieDraft {
    MovieDraft {
        imdb_id: ImdbId::new(id),
        title: title.to_string(),
        year: Some(2001),
        score: Some(7.5),
        score_average: Some(7.1),
        category: "movie".to_string(),
        tmdb_id: None,
        trakt_id: None,
        mal_id: None,
    }
}

const EMPTY_SNAPSHOT: &str = r#"{"search": []}"#;

#[tokio::test]
async fn list_imports_snapshot_records() {
    let (service, store) = spawn_service(
        r#"{"search": [{"imdbid": "tt1", "title": "A", "year": 2001}]}"#,
    )
    .await;

    // First listing: the record was not persisted before the call.
    let movies = service.list().await.unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].imdb_id.as_str(), "tt1");
    assert!(!movies[0].is_saved);

    // The reconciliation imported it into the table.
    assert_eq!(store.movie_count().await.unwrap(), 1);

    // Second listing: the record now exists in the store.
    let movies = service.list().await.unwrap();
    assert_eq!(movies.len(), 1);
    assert!(movies[0].is_saved);
}

#[tokio::test]
async fn reconcile_is_idempotent() {
    let (service, store) = spawn_service(
        r#"{"search": [
            {"imdbid": "tt1", "title": "A", "year": 2001},
            {"imdbid": "tt2", "title": "B", "year": 2002}
        ]}"#,
    )
    .await;

    let first = service.import().await.unwrap();
    assert_eq!(first.inserted, 2);

    let second = service.import().await.unwrap();
    assert_eq!(second.inserted, 0);

    assert_eq!(store.movie_count().await.unwrap(), 2);
}

#[tokio::test]
async fn persisted_record_wins_over_snapshot() {
    let (service, _store) = spawn_service(
        r#"{"search": [{"imdbid": "tt2", "title": "Snapshot title", "year": 2002}]}"#,
    )
    .await;

    service.create(draft("tt2", "Persisted title")).await.unwrap();

    let movies = service.list().await.unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].title, "Persisted title");
    assert!(movies[0].is_saved);
}

#[tokio::test]
async fn list_yields_union_without_duplicate_keys() {
    let (service, _store) = spawn_service(
        r#"{"search": [
            {"imdbid": "tt1", "title": "A"},
            {"imdbid": "tt2", "title": "B"}
        ]}"#,
    )
    .await;

    service.create(draft("tt2", "B stored")).await.unwrap();
    service.create(draft("tt3", "C stored")).await.unwrap();

    let movies = service.list().await.unwrap();
    assert_eq!(movies.len(), 3);

    let mut keys: Vec<&str> = movies.iter().map(|m| m.imdb_id.as_str()).collect();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), 3);
}

#[tokio::test]
async fn list_fails_without_snapshot_file() {
    let snapshot_path = temp_path("missing-snapshot", "json");
    let db_path = temp_path("db", "db");
    let store = Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .unwrap();

    let service = DefaultMovieService::new(
        Arc::new(SnapshotCatalog::new(&snapshot_path)),
        Arc::new(SeaOrmMovieStore::new(store)),
    );

    let err = service.list().await.unwrap_err();
    assert!(matches!(
        err,
        MovieError::Snapshot(SnapshotError::NotFound { .. })
    ));
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let (service, _store) = spawn_service(EMPTY_SNAPSHOT).await;

    let mut payload = draft("tt0111161", "The Shawshank Redemption");
    payload.tmdb_id = Some(278);
    service.create(payload.clone()).await.unwrap();

    let fetched = service.get(&ImdbId::new("tt0111161")).await.unwrap();
    assert_eq!(fetched.title, payload.title);
    assert_eq!(fetched.year, payload.year);
    assert_eq!(fetched.score, payload.score);
    assert_eq!(fetched.category, payload.category);
    assert_eq!(fetched.tmdb_id, Some(278));
    assert!(fetched.is_saved);
}

#[tokio::test]
async fn create_duplicate_key_conflicts() {
    let (service, store) = spawn_service(EMPTY_SNAPSHOT).await;

    service.create(draft("tt1", "A")).await.unwrap();
    let err = service.create(draft("tt1", "A again")).await.unwrap_err();

    assert!(matches!(err, MovieError::Conflict(_)));
    assert_eq!(store.movie_count().await.unwrap(), 1);
}

#[tokio::test]
async fn create_rejects_invalid_payload() {
    let (service, store) = spawn_service(EMPTY_SNAPSHOT).await;

    let mut payload = draft("tt1", "A");
    payload.title = String::new();
    let err = service.create(payload).await.unwrap_err();

    assert!(matches!(err, MovieError::Validation(_)));
    assert_eq!(store.movie_count().await.unwrap(), 0);
}

#[tokio::test]
async fn update_replaces_mutable_fields() {
    let (service, _store) = spawn_service(EMPTY_SNAPSHOT).await;

    service.create(draft("tt1", "Before")).await.unwrap();

    let mut payload = draft("tt1", "After");
    payload.year = Some(2010);
    payload.mal_id = Some(99);
    service.update(&ImdbId::new("tt1"), payload).await.unwrap();

    let fetched = service.get(&ImdbId::new("tt1")).await.unwrap();
    assert_eq!(fetched.title, "After");
    assert_eq!(fetched.year, Some(2010));
    assert_eq!(fetched.mal_id, Some(99));
}

#[tokio::test]
async fn update_key_mismatch_is_rejected_without_mutation() {
    let (service, _store) = spawn_service(EMPTY_SNAPSHOT).await;

    service.create(draft("tt1", "Original")).await.unwrap();

    let err = service
        .update(&ImdbId::new("tt1"), draft("tt2", "Hijacked"))
        .await
        .unwrap_err();
    assert!(matches!(err, MovieError::Validation(_)));

    let fetched = service.get(&ImdbId::new("tt1")).await.unwrap();
    assert_eq!(fetched.title, "Original");
}

#[tokio::test]
async fn update_missing_record_is_not_found() {
    let (service, _store) = spawn_service(EMPTY_SNAPSHOT).await;

    let err = service
        .update(&ImdbId::new("tt404"), draft("tt404", "Ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, MovieError::NotFound(_)));
}

#[tokio::test]
async fn delete_removes_the_row() {
    let (service, store) = spawn_service(EMPTY_SNAPSHOT).await;

    service.create(draft("tt1", "A")).await.unwrap();
    service.delete(&ImdbId::new("tt1")).await.unwrap();

    assert_eq!(store.movie_count().await.unwrap(), 0);
    let err = service.get(&ImdbId::new("tt1")).await.unwrap_err();
    assert!(matches!(err, MovieError::NotFound(_)));
}

#[tokio::test]
async fn delete_missing_record_is_not_found_and_harmless() {
    let (service, store) = spawn_service(EMPTY_SNAPSHOT).await;

    service.create(draft("tt1", "A")).await.unwrap();

    let err = service.delete(&ImdbId::new("tt404")).await.unwrap_err();
    assert!(matches!(err, MovieError::NotFound(_)));
    assert_eq!(store.movie_count().await.unwrap(), 1);
}

#[tokio::test]
async fn import_only_mode_leaves_snapshot_untouched() {
    let snapshot_json =
        r#"{"search": [{"imdbid": "tt1", "title": "A", "year": 2001}]}"#;
    let snapshot_path = temp_path("snapshot", "json");
    std::fs::write(&snapshot_path, snapshot_json).unwrap();

    let db_path = temp_path("db", "db");
    let store = Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .unwrap();
    let service = DefaultMovieService::new(
        Arc::new(SnapshotCatalog::new(&snapshot_path)),
        Arc::new(SeaOrmMovieStore::new(store)),
    );

    service.list().await.unwrap();
    service
        .update(&ImdbId::new("tt1"), draft("tt1", "Edited in db"))
        .await
        .unwrap();

    let on_disk = std::fs::read_to_string(&snapshot_path).unwrap();
    assert_eq!(on_disk, snapshot_json);
}

#[tokio::test]
async fn store_answers_ping() {
    let db_path = temp_path("ping", "db");
    let store = Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .unwrap();
    store.ping().await.unwrap();
}
