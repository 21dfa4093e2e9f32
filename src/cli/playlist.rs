use std::sync::Arc;

use tabled::Table;
use tokio::sync::Mutex;

use crate::{
    config::Config, error, info,
    management::{AuthSession, PlaylistOrchestrator},
    spotify, success,
    types::{PlaylistTableRow, TrackTableRow},
    warning,
};

/// Runs the consent flow when this session holds no delegated token yet.
/// Terminates when the user never completes it; playlist operations cannot
/// proceed without authorization.
async fn ensure_authorized(config: &Config, session: &Arc<Mutex<AuthSession>>) {
    let authenticated = { session.lock().await.tokens.is_authenticated() };
    if authenticated {
        return;
    }

    info!("This session is not authorized with Spotify yet. Starting the consent flow...");
    if spotify::auth::authorize(config, Arc::clone(session)).await.is_err() {
        error!("Authorization failed or timed out.");
    }
}

pub async fn list_playlists(config: &Config, session: Arc<Mutex<AuthSession>>) {
    ensure_authorized(config, &session).await;

    let mut session = session.lock().await;
    let mut orchestrator = PlaylistOrchestrator::new(config, &mut session.tokens);

    match orchestrator.list_my_playlists().await {
        Ok(playlists) if playlists.is_empty() => info!("No playlists found."),
        Ok(playlists) => {
            let rows: Vec<PlaylistTableRow> = playlists
                .iter()
                .map(|p| PlaylistTableRow {
                    name: p.name.clone(),
                    owner: p.owner.clone(),
                    tracks: p.total_tracks,
                    public: if p.public { "yes" } else { "no" }.to_string(),
                })
                .collect();
            println!("{}", Table::new(rows));
        }
        Err(e) => error!("Cannot list playlists: {}", e),
    }
}

pub async fn show_playlist(config: &Config, session: Arc<Mutex<AuthSession>>, playlist_id: String) {
    ensure_authorized(config, &session).await;

    let mut session = session.lock().await;
    let mut orchestrator = PlaylistOrchestrator::new(config, &mut session.tokens);

    match orchestrator.get_playlist(&playlist_id).await {
        Ok(Some(playlist)) => {
            info!(
                "{} by {} - {} tracks, {}",
                playlist.name,
                playlist.owner,
                playlist.total_tracks,
                playlist.total_duration_display()
            );
            if let Some(tracks) = &playlist.tracks {
                let rows: Vec<TrackTableRow> = tracks.iter().map(TrackTableRow::from).collect();
                println!("{}", Table::new(rows));
            }
        }
        Ok(None) => warning!("No playlist found with id {}.", playlist_id),
        Err(e) => error!("Cannot fetch playlist: {}", e),
    }
}

pub async fn create_playlist(
    config: &Config,
    session: Arc<Mutex<AuthSession>>,
    name: String,
    description: String,
    public: bool,
) {
    ensure_authorized(config, &session).await;

    let mut session = session.lock().await;
    let mut orchestrator = PlaylistOrchestrator::new(config, &mut session.tokens);

    let user = match orchestrator.current_user().await {
        Ok(user) => user,
        Err(e) => error!("Cannot resolve the current user: {}", e),
    };

    match orchestrator
        .create_playlist(&user.id, &name, public, &description)
        .await
    {
        Ok(playlist_id) => success!("Playlist '{}' created with id {}.", name, playlist_id),
        Err(e) => error!("Failed to create playlist: {}", e),
    }
}

pub async fn add_playlist_tracks(
    config: &Config,
    session: Arc<Mutex<AuthSession>>,
    playlist_id: String,
    uris: Vec<String>,
) {
    ensure_authorized(config, &session).await;

    let mut session = session.lock().await;
    let mut orchestrator = PlaylistOrchestrator::new(config, &mut session.tokens);

    match orchestrator.add_tracks(&playlist_id, &uris).await {
        Ok(()) => success!("Added {} track(s) to playlist {}.", uris.len(), playlist_id),
        Err(e) => error!("Failed to add tracks to playlist: {}", e),
    }
}

pub async fn remove_playlist_tracks(
    config: &Config,
    session: Arc<Mutex<AuthSession>>,
    playlist_id: String,
    uris: Vec<String>,
) {
    ensure_authorized(config, &session).await;

    let mut session = session.lock().await;
    let mut orchestrator = PlaylistOrchestrator::new(config, &mut session.tokens);

    match orchestrator.remove_tracks(&playlist_id, &uris).await {
        Ok(()) => success!(
            "Removed {} track(s) from playlist {}.",
            uris.len(),
            playlist_id
        ),
        Err(e) => error!("Failed to remove tracks from playlist: {}", e),
    }
}
