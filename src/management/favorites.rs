use crate::{
    error::Result,
    management::StoreLocation,
    types::{FavoritesStats, Track},
    utils,
};

/// How many artists the stats aggregation reports.
const TOP_ARTISTS_LIMIT: usize = 5;

/// JSON-file-backed favorites repository.
///
/// Every mutation is a whole-file read-modify-write of `favorites.json`;
/// there is no partial write and no file locking, so concurrent writers
/// race with last-write-wins. A missing or malformed file reads as an
/// empty store to keep the command surface available.
pub struct FavoritesManager {
    location: StoreLocation,
}

impl FavoritesManager {
    pub fn new(location: StoreLocation) -> Self {
        Self { location }
    }

    /// All saved favorites, in insertion order.
    pub async fn list(&self) -> Vec<Track> {
        let content = match async_fs::read_to_string(self.location.favorites_path()).await {
            Ok(content) => content,
            Err(_) => return Vec::new(),
        };
        // a corrupt store reads as empty rather than failing the command
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Saves a track. Idempotent: returns `false` without rewriting the
    /// file when the id is already present.
    pub async fn add(&self, track: Track) -> Result<bool> {
        let mut favorites = self.list().await;
        if favorites.iter().any(|t| t.id == track.id) {
            return Ok(false);
        }

        favorites.push(track);
        self.persist(&favorites).await?;
        Ok(true)
    }

    /// Removes a saved track by id. Returns `false` when the id was not
    /// in the store, leaving the file untouched.
    pub async fn remove(&self, track_id: &str) -> Result<bool> {
        let mut favorites = self.list().await;
        let before = favorites.len();
        favorites.retain(|t| t.id != track_id);
        if favorites.len() == before {
            return Ok(false);
        }

        self.persist(&favorites).await?;
        Ok(true)
    }

    pub async fn is_favorite(&self, track_id: &str) -> bool {
        self.list().await.iter().any(|t| t.id == track_id)
    }

    /// Aggregates count, total playtime, top artists, and mean popularity
    /// over the store. An empty store yields zeroed stats, never a divide
    /// by zero.
    pub async fn stats(&self) -> FavoritesStats {
        let favorites = self.list().await;
        let total_ms: u64 = favorites.iter().filter_map(|t| t.duration_ms).sum();

        FavoritesStats {
            total: favorites.len(),
            total_duration: utils::format_total_duration(total_ms),
            top_artists: utils::top_artists(&favorites, TOP_ARTISTS_LIMIT),
            avg_popularity: utils::mean_popularity(&favorites),
        }
    }

    async fn persist(&self, favorites: &[Track]) -> Result<()> {
        self.location.ensure_layout().await?;
        let json = serde_json::to_string_pretty(favorites)?;
        async_fs::write(self.location.favorites_path(), json).await?;
        Ok(())
    }
}
