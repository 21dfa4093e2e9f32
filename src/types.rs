use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::utils;

/// OAuth token pair held for one session. Never written to disk; session
/// state lives only as long as the process that obtained it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// A track as the application understands it, flattened from the remote
/// response shape. This is also the persisted representation in the
/// favorites store; persisted and live instances round-trip losslessly.
///
/// Identity is the remote-assigned `id` alone; equality and dedup never
/// consider the other fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    /// Display string, ", "-joined when multiple artists contributed.
    pub artist: String,
    pub album: String,
    pub duration_ms: Option<u64>,
    /// Not every track carries a preview; passed through as returned.
    pub preview_url: Option<String>,
    pub spotify_url: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub popularity: u32,
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Track {}

impl Track {
    /// Translates a raw API track into the domain record. Returns `None`
    /// when the payload carries no id (tombstoned playlist entries).
    pub fn from_api(raw: TrackObject) -> Option<Self> {
        let id = raw.id?;
        let album = raw.album.unwrap_or_default();
        Some(Self {
            id,
            name: raw.name,
            artist: raw
                .artists
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            album: album.name,
            duration_ms: raw.duration_ms,
            preview_url: raw.preview_url,
            spotify_url: raw.external_urls.spotify,
            image_url: album.images.first().map(|i| i.url.clone()),
            popularity: raw.popularity.unwrap_or(0),
        })
    }

    /// Track length as `M:SS`, or `-` when the duration is unknown.
    pub fn duration_display(&self) -> String {
        match self.duration_ms {
            Some(ms) => utils::format_track_duration(ms),
            None => "-".to_string(),
        }
    }
}

/// An artist as returned by catalog search. Transient; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    /// Ordered as returned by the service.
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub popularity: u32,
    #[serde(default)]
    pub followers: u64,
    pub image_url: Option<String>,
    pub spotify_url: String,
}

impl Artist {
    pub fn from_api(raw: ArtistObject) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            genres: raw.genres,
            popularity: raw.popularity.unwrap_or(0),
            followers: raw.followers.map(|f| f.total).unwrap_or(0),
            image_url: raw.images.first().map(|i| i.url.clone()),
            spotify_url: raw.external_urls.spotify,
        }
    }
}

/// A playlist on the user's Spotify account. The track list is attached
/// only when the full playlist was fetched; summary listings leave it
/// absent and carry only `total_tracks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: String,
    pub total_tracks: u64,
    pub public: bool,
    pub owner: String,
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Vec<Track>>,
}

impl Playlist {
    /// Translates a raw API playlist. Per-item track data is attached only
    /// when the response supplied it; items whose track reference is null
    /// or whose track id is null are skipped (the service returns such
    /// tombstones for removed or regionally unavailable tracks).
    pub fn from_api(raw: PlaylistObject) -> Self {
        let (total, items) = match raw.tracks {
            Some(tracks) => (tracks.total, tracks.items),
            None => (0, None),
        };
        let tracks = items.map(|items| {
            items
                .into_iter()
                .filter_map(|item| item.track)
                .filter_map(Track::from_api)
                .collect::<Vec<Track>>()
        });
        Self {
            id: raw.id,
            name: raw.name,
            description: raw.description.unwrap_or_default(),
            total_tracks: total,
            public: raw.public.unwrap_or(true),
            owner: raw
                .owner
                .and_then(|o| o.display_name)
                .unwrap_or_default(),
            image_url: raw
                .images
                .unwrap_or_default()
                .first()
                .map(|i| i.url.clone()),
            tracks,
        }
    }

    /// Adds a track to the materialized list. No-op returning `false` when
    /// a track with the same id is already present; the list holds no
    /// duplicate track ids.
    pub fn add_track(&mut self, track: Track) -> bool {
        let tracks = self.tracks.get_or_insert_with(Vec::new);
        if tracks.iter().any(|t| t.id == track.id) {
            return false;
        }
        tracks.push(track);
        self.total_tracks = tracks.len() as u64;
        true
    }

    /// Removes all occurrences of the given track id. Returns whether
    /// anything was removed.
    pub fn remove_track(&mut self, track_id: &str) -> bool {
        let Some(tracks) = self.tracks.as_mut() else {
            return false;
        };
        let before = tracks.len();
        tracks.retain(|t| t.id != track_id);
        self.total_tracks = tracks.len() as u64;
        tracks.len() < before
    }

    /// Sum of the known track durations, in milliseconds.
    pub fn total_duration_ms(&self) -> u64 {
        self.tracks
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(|t| t.duration_ms)
            .sum()
    }

    /// Total playtime as `{H}h {M}min`, or `{M}min` under an hour.
    pub fn total_duration_display(&self) -> String {
        utils::format_total_duration(self.total_duration_ms())
    }
}

/// Aggregate statistics over the favorites store.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoritesStats {
    pub total: usize,
    pub total_duration: String,
    /// Top 5 artists by favorite count, descending, ties broken by
    /// first-encountered order.
    pub top_artists: Vec<(String, u64)>,
    pub avg_popularity: f64,
}

/// One recorded search. The history file keeps the most recent 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    pub query: String,
    pub timestamp: String,
    pub result_count: u64,
}

// --- raw Spotify Web API response shapes ------------------------------------
//
// Deserialized once at the client boundary and immediately translated into
// the domain records above; nothing outside the client layer touches these.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackObject {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<TrackArtistRef>,
    pub album: Option<AlbumRef>,
    pub duration_ms: Option<u64>,
    pub preview_url: Option<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub popularity: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Followers {
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistObject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    pub popularity: Option<u32>,
    pub followers: Option<Followers>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistOwner {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<TrackObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTracksRef {
    #[serde(default)]
    pub total: u64,
    pub items: Option<Vec<PlaylistItem>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistObject {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub public: Option<bool>,
    pub owner: Option<PlaylistOwner>,
    pub images: Option<Vec<Image>>,
    pub tracks: Option<PlaylistTracksRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<Page<TrackObject>>,
    pub artists: Option<Page<ArtistObject>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksResponse {
    #[serde(default)]
    pub tracks: Vec<TrackObject>,
}

/// The authenticated user's profile, as returned by `/me`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackUri {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemoveTracksRequest {
    pub tracks: Vec<TrackUri>,
}

// --- CLI table rows ---------------------------------------------------------

#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub duration: String,
}

impl From<&Track> for TrackTableRow {
    fn from(track: &Track) -> Self {
        Self {
            name: track.name.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            duration: track.duration_display(),
        }
    }
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub name: String,
    pub followers: u64,
    pub genres: String,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub name: String,
    pub owner: String,
    pub tracks: u64,
    pub public: String,
}

#[derive(Tabled)]
pub struct TopArtistRow {
    pub artist: String,
    pub favorites: u64,
}

#[derive(Tabled)]
pub struct HistoryTableRow {
    pub query: String,
    pub results: u64,
    pub when: String,
}
