use std::path::PathBuf;

use crate::error::Result;

/// Base directory of the JSON-backed local store.
///
/// Injected into the favorites and history managers so tests can point
/// them at a scratch directory; the default lives under the
/// platform-specific local data directory.
#[derive(Debug, Clone)]
pub struct StoreLocation {
    base: PathBuf,
}

impl StoreLocation {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn default_location() -> Self {
        let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        base.push("spofavcli/store");
        Self { base }
    }

    pub fn favorites_path(&self) -> PathBuf {
        self.base.join("favorites.json")
    }

    pub fn history_path(&self) -> PathBuf {
        self.base.join("search_history.json")
    }

    pub fn playlists_path(&self) -> PathBuf {
        self.base.join("my_playlists.json")
    }

    /// Creates the store directory and initializes the reserved playlist
    /// map to `{}` when missing. Existing files are left untouched.
    pub async fn ensure_layout(&self) -> Result<()> {
        async_fs::create_dir_all(&self.base).await?;

        let playlists = self.playlists_path();
        if async_fs::metadata(&playlists).await.is_err() {
            async_fs::write(&playlists, "{}").await?;
        }

        Ok(())
    }
}
