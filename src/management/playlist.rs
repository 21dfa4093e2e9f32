use crate::{
    config::Config,
    error::Result,
    management::TokenManager,
    spotify::CatalogClient,
    types::{CreatePlaylistRequest, Playlist, UserProfile},
};

/// Composes the token lifecycle with the catalog client to run playlist
/// operations on the user's account.
///
/// Every operation asks the token manager for a valid delegated token
/// first; a missing or unrefreshable token surfaces as
/// [`Error::AuthRequired`](crate::error::Error::AuthRequired) before any
/// remote call is made.
pub struct PlaylistOrchestrator<'a> {
    config: &'a Config,
    tokens: &'a mut TokenManager,
}

impl<'a> PlaylistOrchestrator<'a> {
    pub fn new(config: &'a Config, tokens: &'a mut TokenManager) -> Self {
        Self { config, tokens }
    }

    async fn delegated_client(&mut self) -> Result<CatalogClient> {
        let access_token = self.tokens.current_token().await?;
        Ok(CatalogClient::delegated(self.config, access_token))
    }

    /// Resolves the authenticated user, used as the owner for
    /// [`Self::create_playlist`].
    pub async fn current_user(&mut self) -> Result<UserProfile> {
        let client = self.delegated_client().await?;
        client.current_user().await
    }

    /// Creates a playlist and returns its new id.
    pub async fn create_playlist(
        &mut self,
        user_id: &str,
        name: &str,
        public: bool,
        description: &str,
    ) -> Result<String> {
        let client = self.delegated_client().await?;
        let request = CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
            public,
        };
        client.create_playlist(user_id, &request).await
    }

    /// Adds a batch of track URIs to a playlist. All-or-nothing per call;
    /// no partial-application bookkeeping is attempted locally.
    pub async fn add_tracks(&mut self, playlist_id: &str, uris: &[String]) -> Result<()> {
        let client = self.delegated_client().await?;
        client.add_playlist_tracks(playlist_id, uris).await
    }

    /// Removes a batch of track URIs from a playlist, all-or-nothing.
    pub async fn remove_tracks(&mut self, playlist_id: &str, uris: &[String]) -> Result<()> {
        let client = self.delegated_client().await?;
        client.remove_playlist_tracks(playlist_id, uris).await
    }

    /// The user's playlists as summary records. Requires a delegated
    /// token; once authorized, a remote failure reads as an empty list
    /// (read path, not fatal).
    pub async fn list_my_playlists(&mut self) -> Result<Vec<Playlist>> {
        let client = self.delegated_client().await?;
        Ok(client.my_playlists().await)
    }

    /// One playlist with its track list materialized.
    pub async fn get_playlist(&mut self, playlist_id: &str) -> Result<Option<Playlist>> {
        let client = self.delegated_client().await?;
        Ok(client.get_playlist(playlist_id).await)
    }
}
