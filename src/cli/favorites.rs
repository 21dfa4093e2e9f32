use tabled::Table;

use crate::{
    cli, config::Config, error, info,
    management::{FavoritesManager, StoreLocation},
    spotify::CatalogClient,
    success,
    types::{TopArtistRow, TrackTableRow},
    warning,
};

pub async fn list_favorites(store: &StoreLocation) {
    let manager = FavoritesManager::new(store.clone());
    let favorites = manager.list().await;

    if favorites.is_empty() {
        info!("No favorites saved yet.");
        return;
    }

    let rows: Vec<TrackTableRow> = favorites.iter().map(TrackTableRow::from).collect();
    println!("{}", Table::new(rows));
}

pub async fn add_favorite(config: &Config, store: &StoreLocation, track_id: String) {
    let client = match CatalogClient::app(config).await {
        Ok(client) => client,
        Err(e) => error!("Cannot reach the catalog service: {}", e),
    };

    let pb = cli::spinner("Looking up track...");
    let track = client.get_track(&track_id).await;
    pb.finish_and_clear();

    let Some(track) = track else {
        warning!("No track found with id {}.", track_id);
        return;
    };

    let manager = FavoritesManager::new(store.clone());
    match manager.add(track.clone()).await {
        Ok(true) => success!("Added '{}' by {} to favorites.", track.name, track.artist),
        Ok(false) => info!("'{}' is already in favorites.", track.name),
        Err(e) => error!("Failed to save favorites: {}", e),
    }
}

pub async fn remove_favorite(store: &StoreLocation, track_id: String) {
    let manager = FavoritesManager::new(store.clone());
    match manager.remove(&track_id).await {
        Ok(true) => success!("Removed track {} from favorites.", track_id),
        Ok(false) => warning!("Track {} is not in favorites.", track_id),
        Err(e) => error!("Failed to save favorites: {}", e),
    }
}

pub async fn favorites_stats(store: &StoreLocation) {
    let manager = FavoritesManager::new(store.clone());
    let stats = manager.stats().await;

    info!("Saved favorites: {}", stats.total);
    info!("Total playtime: {}", stats.total_duration);
    info!("Average popularity: {:.1}", stats.avg_popularity);

    if stats.top_artists.is_empty() {
        return;
    }

    let rows: Vec<TopArtistRow> = stats
        .top_artists
        .into_iter()
        .map(|(artist, favorites)| TopArtistRow { artist, favorites })
        .collect();
    println!("{}", Table::new(rows));
}
