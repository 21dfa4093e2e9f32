use spofavcli::management::{FavoritesManager, SearchHistoryManager, StoreLocation};
use spofavcli::types::Track;
use tempfile::TempDir;

fn scratch_store() -> (TempDir, StoreLocation) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let location = StoreLocation::new(dir.path().join("store"));
    (dir, location)
}

fn create_test_track(id: &str, artist: &str, duration_ms: u64, popularity: u32) -> Track {
    Track {
        id: id.to_string(),
        name: format!("Track {}", id),
        artist: artist.to_string(),
        album: "Test Album".to_string(),
        duration_ms: Some(duration_ms),
        preview_url: None,
        spotify_url: format!("https://open.spotify.com/track/{}", id),
        image_url: None,
        popularity,
    }
}

#[tokio::test]
async fn test_add_favorite_is_idempotent() {
    let (_dir, location) = scratch_store();
    let manager = FavoritesManager::new(location);

    let track = create_test_track("id1", "Artist A", 200_000, 50);
    assert!(manager.add(track.clone()).await.unwrap());

    // second add of the same id reports "already present"
    assert!(!manager.add(track).await.unwrap());
    assert_eq!(manager.list().await.len(), 1);
}

#[tokio::test]
async fn test_remove_missing_favorite_reports_not_found() {
    let (_dir, location) = scratch_store();
    let manager = FavoritesManager::new(location);

    let track = create_test_track("id1", "Artist A", 200_000, 50);
    manager.add(track).await.unwrap();

    assert!(!manager.remove("unknown-id").await.unwrap());
    // store is left unchanged
    assert_eq!(manager.list().await.len(), 1);
}

#[tokio::test]
async fn test_remove_favorite() {
    let (_dir, location) = scratch_store();
    let manager = FavoritesManager::new(location);

    manager
        .add(create_test_track("id1", "Artist A", 200_000, 50))
        .await
        .unwrap();
    manager
        .add(create_test_track("id2", "Artist B", 180_000, 60))
        .await
        .unwrap();

    assert!(manager.remove("id1").await.unwrap());

    let remaining = manager.list().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, "id2");
}

#[tokio::test]
async fn test_list_keeps_insertion_order() {
    let (_dir, location) = scratch_store();
    let manager = FavoritesManager::new(location);

    for id in ["id3", "id1", "id2"] {
        manager
            .add(create_test_track(id, "Artist", 100_000, 0))
            .await
            .unwrap();
    }

    let ids: Vec<String> = manager.list().await.into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["id3", "id1", "id2"]);
}

#[tokio::test]
async fn test_is_favorite() {
    let (_dir, location) = scratch_store();
    let manager = FavoritesManager::new(location);

    manager
        .add(create_test_track("id1", "Artist A", 200_000, 50))
        .await
        .unwrap();

    assert!(manager.is_favorite("id1").await);
    assert!(!manager.is_favorite("id2").await);
}

#[tokio::test]
async fn test_stats_empty_store() {
    let (_dir, location) = scratch_store();
    let manager = FavoritesManager::new(location);

    let stats = manager.stats().await;
    assert_eq!(stats.total, 0);
    assert_eq!(stats.total_duration, "0min");
    assert!(stats.top_artists.is_empty());
    assert_eq!(stats.avg_popularity, 0.0);
}

#[tokio::test]
async fn test_stats_aggregates() {
    let (_dir, location) = scratch_store();
    let manager = FavoritesManager::new(location);

    // 40 + 45 = 85 minutes total
    manager
        .add(create_test_track("id1", "Artist A", 40 * 60 * 1000, 40))
        .await
        .unwrap();
    manager
        .add(create_test_track("id2", "Artist A", 45 * 60 * 1000, 80))
        .await
        .unwrap();
    manager
        .add(create_test_track("id3", "Artist B", 0, 60))
        .await
        .unwrap();

    let stats = manager.stats().await;
    assert_eq!(stats.total, 3);
    assert_eq!(stats.total_duration, "1h 25min");
    assert_eq!(
        stats.top_artists,
        vec![("Artist A".to_string(), 2), ("Artist B".to_string(), 1)]
    );
    assert_eq!(stats.avg_popularity, 60.0);
}

#[tokio::test]
async fn test_corrupt_favorites_file_reads_as_empty() {
    let (_dir, location) = scratch_store();
    location.ensure_layout().await.unwrap();
    async_fs::write(location.favorites_path(), "{not valid json")
        .await
        .unwrap();

    let manager = FavoritesManager::new(location);
    assert!(manager.list().await.is_empty());

    // the store stays usable; the next write replaces the corrupt file
    assert!(
        manager
            .add(create_test_track("id1", "Artist A", 100_000, 10))
            .await
            .unwrap()
    );
    assert_eq!(manager.list().await.len(), 1);
}

#[tokio::test]
async fn test_history_caps_at_most_recent_100() {
    let (_dir, location) = scratch_store();
    let manager = SearchHistoryManager::new(location);

    for i in 0..105 {
        manager.record(&format!("query {}", i), i).await.unwrap();
    }

    let entries = manager.recent().await;
    assert_eq!(entries.len(), 100);

    // the five oldest entries were dropped first
    assert_eq!(entries[0].query, "query 5");
    assert_eq!(entries[99].query, "query 104");
}

#[tokio::test]
async fn test_history_records_result_count() {
    let (_dir, location) = scratch_store();
    let manager = SearchHistoryManager::new(location);

    manager.record("imagine", 20).await.unwrap();

    let entries = manager.recent().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].query, "imagine");
    assert_eq!(entries[0].result_count, 20);
    assert!(!entries[0].timestamp.is_empty());
}

#[tokio::test]
async fn test_ensure_layout_initializes_reserved_playlist_map() {
    let (_dir, location) = scratch_store();
    location.ensure_layout().await.unwrap();

    let content = async_fs::read_to_string(location.playlists_path())
        .await
        .unwrap();
    assert_eq!(content, "{}");

    // an existing file is left untouched
    async_fs::write(location.playlists_path(), "{\"keep\":true}")
        .await
        .unwrap();
    location.ensure_layout().await.unwrap();
    let content = async_fs::read_to_string(location.playlists_path())
        .await
        .unwrap();
    assert_eq!(content, "{\"keep\":true}");
}
