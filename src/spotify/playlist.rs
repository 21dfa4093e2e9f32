use crate::{
    error::{Error, Result},
    spotify::CatalogClient,
    types::{
        AddTracksRequest, CreatePlaylistRequest, CreatePlaylistResponse, Page, Playlist,
        PlaylistObject, RemoveTracksRequest, TrackUri, UserProfile,
    },
    warning,
};

impl CatalogClient {
    /// Fetches the authenticated user's profile. Requires a delegated
    /// token; used to resolve the owner id for playlist creation.
    pub async fn current_user(&self) -> Result<UserProfile> {
        let url = format!("{uri}/me", uri = self.api_url());
        self.get_json(&url).await
    }

    /// Lists the authenticated user's playlists as summary records (no
    /// track lists attached). Read path: remote failure degrades to an
    /// empty result, logged.
    pub async fn my_playlists(&self) -> Vec<Playlist> {
        let url = format!("{uri}/me/playlists?limit=50", uri = self.api_url());

        match self.get_json::<Page<PlaylistObject>>(&url).await {
            Ok(page) => page.items.into_iter().map(Playlist::from_api).collect(),
            Err(e) => {
                warning!("Failed to list playlists: {}", e);
                Vec::new()
            }
        }
    }

    /// Fetches one playlist with its track list materialized. `None` when
    /// the id is unknown or the remote read fails.
    pub async fn get_playlist(&self, playlist_id: &str) -> Option<Playlist> {
        let url = format!(
            "{uri}/playlists/{id}",
            uri = self.api_url(),
            id = playlist_id
        );

        match self.get_json::<PlaylistObject>(&url).await {
            Ok(raw) => Some(Playlist::from_api(raw)),
            Err(Error::NotFound(_)) => None,
            Err(e) => {
                warning!("Playlist lookup failed: {}", e);
                None
            }
        }
    }

    /// Creates a playlist on the given user's account and returns the new
    /// playlist id.
    pub async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<String> {
        let url = format!(
            "{uri}/users/{user}/playlists",
            uri = self.api_url(),
            user = user_id
        );

        let response = self
            .http()
            .post(&url)
            .bearer_auth(self.bearer())
            .json(request)
            .send()
            .await
            .map_err(|e| Error::RemoteMutation(e.to_string()))?;
        let response = Self::check_mutation(response).await?;

        let created: CreatePlaylistResponse = response
            .json()
            .await
            .map_err(|e| Error::RemoteMutation(e.to_string()))?;
        Ok(created.id)
    }

    /// Adds the given track URIs to a playlist. The service accepts the
    /// whole batch or rejects the call; there is no partial application.
    pub async fn add_playlist_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        let url = format!(
            "{uri}/playlists/{id}/tracks",
            uri = self.api_url(),
            id = playlist_id
        );
        let request = AddTracksRequest {
            uris: uris.to_vec(),
        };

        let response = self
            .http()
            .post(&url)
            .bearer_auth(self.bearer())
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::RemoteMutation(e.to_string()))?;
        Self::check_mutation(response).await?;
        Ok(())
    }

    /// Removes all occurrences of the given track URIs from a playlist.
    /// All-or-nothing per call, like [`Self::add_playlist_tracks`].
    pub async fn remove_playlist_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        let url = format!(
            "{uri}/playlists/{id}/tracks",
            uri = self.api_url(),
            id = playlist_id
        );
        let request = RemoveTracksRequest {
            tracks: uris
                .iter()
                .map(|uri| TrackUri { uri: uri.clone() })
                .collect(),
        };

        let response = self
            .http()
            .delete(&url)
            .bearer_auth(self.bearer())
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::RemoteMutation(e.to_string()))?;
        Self::check_mutation(response).await?;
        Ok(())
    }
}
