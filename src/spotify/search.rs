use urlencoding::encode;

use crate::{
    error::Error,
    spotify::CatalogClient,
    types::{Artist, SearchResponse, TopTracksResponse, Track, TrackObject},
    warning,
};

impl CatalogClient {
    /// Searches the catalog for tracks, in the service's relevance order.
    ///
    /// An empty or whitespace query short-circuits to an empty result
    /// without a remote call. Remote failures degrade to an empty result
    /// and are logged, never propagated.
    pub async fn search_tracks(&self, query: &str, limit: u32) -> Vec<Track> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let url = format!(
            "{uri}/search?q={query}&type=track&limit={limit}",
            uri = self.api_url(),
            query = encode(query),
            limit = limit
        );

        match self.get_json::<SearchResponse>(&url).await {
            Ok(response) => translate_tracks(
                response.tracks.map(|page| page.items).unwrap_or_default(),
            ),
            Err(e) => {
                warning!("Track search failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Searches the catalog for artists, in the service's relevance order.
    /// The first entry is what callers treat as the primary artist.
    pub async fn search_artists(&self, query: &str, limit: u32) -> Vec<Artist> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let url = format!(
            "{uri}/search?q={query}&type=artist&limit={limit}",
            uri = self.api_url(),
            query = encode(query),
            limit = limit
        );

        match self.get_json::<SearchResponse>(&url).await {
            Ok(response) => response
                .artists
                .map(|page| page.items)
                .unwrap_or_default()
                .into_iter()
                .map(Artist::from_api)
                .collect(),
            Err(e) => {
                warning!("Artist search failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Looks up a single track by catalog id. `None` when the id is
    /// unknown; transport failures are logged and read as a miss.
    pub async fn get_track(&self, id: &str) -> Option<Track> {
        let url = format!("{uri}/tracks/{id}", uri = self.api_url(), id = id);

        match self.get_json::<TrackObject>(&url).await {
            Ok(raw) => Track::from_api(raw),
            Err(Error::NotFound(_)) => None,
            Err(e) => {
                warning!("Track lookup failed: {}", e);
                None
            }
        }
    }

    /// Fetches an artist's top tracks for the given market, in the
    /// service's ranking order.
    pub async fn artist_top_tracks(&self, artist_id: &str, market: &str) -> Vec<Track> {
        let url = format!(
            "{uri}/artists/{id}/top-tracks?market={market}",
            uri = self.api_url(),
            id = artist_id,
            market = market
        );

        match self.get_json::<TopTracksResponse>(&url).await {
            Ok(response) => translate_tracks(response.tracks),
            Err(e) => {
                warning!("Top-tracks lookup failed: {}", e);
                Vec::new()
            }
        }
    }
}

fn translate_tracks(raw: Vec<TrackObject>) -> Vec<Track> {
    raw.into_iter().filter_map(Track::from_api).collect()
}
