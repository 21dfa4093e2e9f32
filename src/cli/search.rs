use tabled::Table;

use crate::{
    cli, config::Config, error, info,
    management::{SearchHistoryManager, StoreLocation},
    spotify::CatalogClient,
    types::{ArtistTableRow, Track, TrackTableRow},
    utils, warning,
};

/// How many artist candidates to consider in artist mode. Only the first
/// one is treated as the primary artist.
const ARTIST_CANDIDATES: u32 = 3;

pub async fn search(
    config: &Config,
    store: &StoreLocation,
    query: String,
    artist_mode: bool,
    limit: u32,
    region: String,
) {
    if query.trim().is_empty() {
        warning!("Nothing to search for.");
        return;
    }

    let client = match CatalogClient::app(config).await {
        Ok(client) => client,
        Err(e) => error!("Cannot reach the catalog service: {}", e),
    };
    let history = SearchHistoryManager::new(store.clone());

    if artist_mode {
        search_artist_mode(&client, &history, &query, limit, &region).await;
    } else {
        search_track_mode(&client, &history, &query, limit).await;
    }
}

async fn search_track_mode(
    client: &CatalogClient,
    history: &SearchHistoryManager,
    query: &str,
    limit: u32,
) {
    let pb = cli::spinner("Searching the catalog...");
    let mut tracks = client.search_tracks(query, limit).await;
    pb.finish_and_clear();

    utils::remove_duplicate_tracks(&mut tracks);
    record_search(history, query, tracks.len() as u64).await;

    if tracks.is_empty() {
        info!("No tracks found for '{}'.", query);
        return;
    }

    print_track_table(&tracks);
}

/// Artist mode mirrors the original search page: the first artist match is
/// the primary artist (relevance order, no tie-break beyond the service's
/// ranking), its own top tracks are shown first, and the plain track
/// search minus the primary artist's entries becomes the related list.
async fn search_artist_mode(
    client: &CatalogClient,
    history: &SearchHistoryManager,
    query: &str,
    limit: u32,
    region: &str,
) {
    let pb = cli::spinner("Searching the catalog...");
    let artists = client.search_artists(query, ARTIST_CANDIDATES).await;

    let Some(primary) = artists.first() else {
        pb.finish_and_clear();
        record_search(history, query, 0).await;
        info!("No artist found for '{}'.", query);
        return;
    };

    let top_tracks = client.artist_top_tracks(&primary.id, region).await;
    let mut own_tracks: Vec<Track> = top_tracks
        .into_iter()
        .filter(|t| t.artist.to_lowercase() == primary.name.to_lowercase())
        .collect();

    let mut related: Vec<Track> = client
        .search_tracks(query, limit)
        .await
        .into_iter()
        .filter(|t| t.artist.to_lowercase() != primary.name.to_lowercase())
        .collect();
    pb.finish_and_clear();

    utils::remove_duplicate_tracks(&mut own_tracks);
    utils::remove_duplicate_tracks(&mut related);
    record_search(history, query, (own_tracks.len() + related.len()) as u64).await;

    let genres = primary
        .genres
        .iter()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .join(",");
    println!(
        "{}",
        Table::new(vec![ArtistTableRow {
            name: primary.name.clone(),
            followers: primary.followers,
            genres,
        }])
    );

    if own_tracks.is_empty() {
        info!("No top tracks found for {}.", primary.name);
    } else {
        info!("Top tracks by {}:", primary.name);
        print_track_table(&own_tracks);
    }

    if !related.is_empty() {
        info!("More tracks matching '{}':", query);
        print_track_table(&related);
    }
}

async fn record_search(history: &SearchHistoryManager, query: &str, result_count: u64) {
    if let Err(e) = history.record(query, result_count).await {
        warning!("Failed to record search history: {}", e);
    }
}

fn print_track_table(tracks: &[Track]) {
    let rows: Vec<TrackTableRow> = tracks.iter().map(TrackTableRow::from).collect();
    println!("{}", Table::new(rows));
}
