//! Configuration management for the Spotify Favorites CLI.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. Spotify application credentials
//! (client id, client secret, redirect URI) are required and their absence is
//! a startup configuration error; the service endpoints and the callback
//! server address carry production defaults that can be overridden for
//! testing.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory, then in the working directory
//! 3. Application defaults (endpoints, scope, server address)

use std::{env, path::PathBuf};

use crate::error::{Error, Result};

const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";

/// Scopes requested during the consent flow. Covers playlist mutation,
/// library read/write, and the private-profile lookup used to resolve the
/// current user for playlist creation.
const DEFAULT_SCOPE: &str = "playlist-modify-public playlist-modify-private \
                             user-library-read user-library-modify user-read-private";

/// Loads environment variables from `.env` files.
///
/// Looks for a `.env` file in the platform-specific local data directory
/// under `spofavcli/.env` first, then falls back to a `.env` in the current
/// working directory. Both files are optional; a missing file is not an
/// error. Creates the data directory structure if it doesn't exist so users
/// have a place to drop their configuration.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spofavcli/.env`
/// - macOS: `~/Library/Application Support/spofavcli/.env`
/// - Windows: `%LOCALAPPDATA%/spofavcli/.env`
pub async fn load_env() {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spofavcli/.env");
    if let Some(parent) = path.parent() {
        let _ = async_fs::create_dir_all(parent).await;
    }

    let _ = dotenv::from_path(&path);
    let _ = dotenv::dotenv();
}

/// Static application configuration, sourced from the environment.
///
/// Constructed once at startup with [`Config::from_env`] and passed into the
/// client, token manager, and server layers explicitly; nothing in the crate
/// reads the environment after construction.
#[derive(Debug, Clone)]
pub struct Config {
    /// Spotify application client id.
    pub client_id: String,
    /// Spotify application client secret.
    pub client_secret: String,
    /// OAuth redirect URI registered with the Spotify application.
    pub redirect_uri: String,
    /// Base URL of the Spotify Web API.
    pub api_url: String,
    /// URL of the accounts-service consent page.
    pub auth_url: String,
    /// URL of the accounts-service token endpoint.
    pub token_url: String,
    /// Scopes requested for delegated authorization.
    pub scope: String,
    /// Bind address for the local OAuth callback server.
    pub server_addr: String,
}

impl Config {
    /// Builds the configuration from environment variables.
    ///
    /// `SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET`, and
    /// `SPOTIFY_REDIRECT_URI` are required; a missing value yields
    /// [`Error::Configuration`]. `SPOTIFY_API_URL`, `SPOTIFY_API_AUTH_URL`,
    /// `SPOTIFY_API_TOKEN_URL`, `SPOTIFY_API_AUTH_SCOPE`, and
    /// `SERVER_ADDRESS` are optional overrides.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: require("SPOTIFY_CLIENT_ID")?,
            client_secret: require("SPOTIFY_CLIENT_SECRET")?,
            redirect_uri: require("SPOTIFY_REDIRECT_URI")?,
            api_url: env_or("SPOTIFY_API_URL", DEFAULT_API_URL),
            auth_url: env_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: env_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            scope: env_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            server_addr: env_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
        })
    }
}

fn require(name: &str) -> Result<String> {
    env::var(name)
        .map_err(|_| Error::Configuration(format!("{name} must be set")))
        .and_then(|value| {
            if value.trim().is_empty() {
                Err(Error::Configuration(format!("{name} must not be empty")))
            } else {
                Ok(value)
            }
        })
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}
