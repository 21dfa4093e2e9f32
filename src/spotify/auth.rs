use std::{sync::Arc, time::Duration};

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    config::Config,
    error::{Error, Result},
    management::{AuthSession, AuthorizationExchange, TokenManager},
    server::start_api_server,
    types::Token,
    warning,
};

/// Basic-auth credential for the accounts-service token endpoint,
/// `base64(client_id:client_secret)`.
fn basic_credentials(config: &Config) -> String {
    STANDARD.encode(format!("{}:{}", config.client_id, config.client_secret))
}

/// Obtains an app-level access token via the client-credentials grant.
///
/// This token authorizes public reads (search, track lookup, top tracks)
/// and carries no user context. Used by
/// [`CatalogClient::app`](crate::spotify::CatalogClient::app).
pub async fn request_app_token(config: &Config) -> Result<String> {
    let client = Client::new();
    let response = client
        .post(&config.token_url)
        .header("Authorization", format!("Basic {}", basic_credentials(config)))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|e| Error::Remote(e.to_string()))?
        .error_for_status()
        .map_err(|e| Error::Remote(e.to_string()))?;

    let json: Value = response
        .json()
        .await
        .map_err(|e| Error::Remote(e.to_string()))?;

    json["access_token"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::Remote("token response carried no access_token".to_string()))
}

/// Exchanges an authorization code for the initial token pair.
///
/// Final step of the authorization-code flow; the code arrives through the
/// local callback server and is single-use with a short lifetime. A
/// rejected or expired code yields [`Error::AuthExchangeFailed`].
pub async fn exchange_code(config: &Config, code: &str) -> Result<Token> {
    let client = Client::new();
    let response = client
        .post(&config.token_url)
        .header("Authorization", format!("Basic {}", basic_credentials(config)))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &config.redirect_uri),
        ])
        .send()
        .await
        .map_err(|e| Error::AuthExchangeFailed(e.to_string()))?;

    if !response.status().is_success() {
        return Err(Error::AuthExchangeFailed(format!(
            "HTTP {}",
            response.status()
        )));
    }

    let json: Value = response
        .json()
        .await
        .map_err(|e| Error::AuthExchangeFailed(e.to_string()))?;

    token_from_response(&json, None)
        .ok_or_else(|| Error::AuthExchangeFailed("malformed token response".to_string()))
}

/// Refreshes an expired access token using the held refresh token.
///
/// The accounts service may omit `refresh_token` from a refresh response;
/// in that case the previous refresh token stays valid and is carried over.
pub async fn refresh_token(config: &Config, refresh_token: &str) -> Result<Token> {
    let client = Client::new();
    let response = client
        .post(&config.token_url)
        .header("Authorization", format!("Basic {}", basic_credentials(config)))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await
        .map_err(|e| Error::Remote(e.to_string()))?
        .error_for_status()
        .map_err(|e| Error::Remote(e.to_string()))?;

    let json: Value = response
        .json()
        .await
        .map_err(|e| Error::Remote(e.to_string()))?;

    token_from_response(&json, Some(refresh_token))
        .ok_or_else(|| Error::Remote("malformed token response".to_string()))
}

fn token_from_response(json: &Value, previous_refresh: Option<&str>) -> Option<Token> {
    Some(Token {
        access_token: json["access_token"].as_str()?.to_string(),
        refresh_token: json["refresh_token"]
            .as_str()
            .or(previous_refresh)?
            .to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_u64().unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}

/// The production [`AuthorizationExchange`]: code exchange and refresh
/// against the Spotify accounts service.
pub struct SpotifyAuthorization {
    config: Config,
}

impl SpotifyAuthorization {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

#[async_trait::async_trait]
impl AuthorizationExchange for SpotifyAuthorization {
    async fn exchange_code(&self, code: &str) -> Result<Token> {
        exchange_code(&self.config, code).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Token> {
        crate::spotify::auth::refresh_token(&self.config, refresh_token).await
    }
}

/// Runs the interactive delegated-authorization flow for this session.
///
/// 1. Builds the consent URL with the session's anti-forgery `state`
/// 2. Starts the local callback server on a background task
/// 3. Opens the consent page in the user's browser (with a manual-URL
///    fallback warning when that fails)
/// 4. Waits for the callback to complete the code exchange
///
/// The callback handler drives
/// [`TokenManager::complete_authorization`](crate::management::TokenManager::complete_authorization)
/// on the shared session; this function only observes the result. Returns
/// [`Error::AuthRequired`] when no authorization arrives within the wait
/// window.
pub async fn authorize(config: &Config, session: Arc<Mutex<AuthSession>>) -> Result<()> {
    let auth_url = {
        let lock = session.lock().await;
        TokenManager::begin_authorization(config, &lock.expected_state)
    };

    let server_config = config.clone();
    let server_session = Arc::clone(&session);
    tokio::spawn(async move {
        start_api_server(server_config, server_session).await;
    });

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    wait_for_authorization(session).await
}

/// Polls the shared session until the callback stored a token, with a
/// 60-second timeout (1-second interval, async sleep).
async fn wait_for_authorization(session: Arc<Mutex<AuthSession>>) -> Result<()> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        {
            let lock = session.lock().await;
            if lock.tokens.is_authenticated() {
                return Ok(());
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    Err(Error::AuthRequired)
}
