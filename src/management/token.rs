use chrono::Utc;
use urlencoding::encode;

use crate::{
    config::Config,
    error::{Error, Result},
    types::Token,
    utils,
};

/// Refresh this many seconds before the token actually expires.
const EXPIRY_LEEWAY_SECS: u64 = 240;

/// The two accounts-service calls the token lifecycle depends on, behind a
/// seam so the manager can be exercised with fakes. The production
/// implementation is
/// [`SpotifyAuthorization`](crate::spotify::auth::SpotifyAuthorization).
#[async_trait::async_trait]
pub trait AuthorizationExchange: Send + Sync {
    async fn exchange_code(&self, code: &str) -> Result<Token>;
    async fn refresh(&self, refresh_token: &str) -> Result<Token>;
}

/// Owns the delegated token for one user session.
///
/// Session state is held in memory only and dies with the session; it is
/// mutated exclusively here. Every operation that needs a user-delegated
/// catalog client goes through [`TokenManager::current_token`] - there is
/// no other path to a valid token.
///
/// States: no token (unauthenticated) -> token held (authenticated) ->
/// past expiry (refreshed in place, or dropped back to unauthenticated
/// when the refresh fails).
pub struct TokenManager {
    session: Option<Token>,
    exchange: Box<dyn AuthorizationExchange>,
}

impl TokenManager {
    pub fn new(exchange: Box<dyn AuthorizationExchange>) -> Self {
        Self {
            session: None,
            exchange,
        }
    }

    /// Builds the consent-page redirect target. Pure construction from the
    /// configured client id, redirect URI, and scopes; the `state`
    /// parameter ties the eventual callback to this flow.
    pub fn begin_authorization(config: &Config, state: &str) -> String {
        format!(
            "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}&state={state}",
            auth_url = config.auth_url,
            client_id = config.client_id,
            redirect_uri = encode(&config.redirect_uri),
            scope = encode(&config.scope),
            state = state
        )
    }

    /// Exchanges an authorization code for the initial token pair and
    /// stores it as this session's state.
    pub async fn complete_authorization(&mut self, code: &str) -> Result<()> {
        let token = self.exchange.exchange_code(code).await.map_err(|e| match e {
            Error::AuthExchangeFailed(_) => e,
            other => Error::AuthExchangeFailed(other.to_string()),
        })?;
        self.session = Some(token);
        Ok(())
    }

    /// Returns the held access token, refreshing it first when expired.
    ///
    /// The refreshed token pair atomically replaces session state before
    /// the access token is returned. A failed refresh drops the session
    /// back to unauthenticated and reports [`Error::AuthRequired`]; so
    /// does the absence of any session token.
    pub async fn current_token(&mut self) -> Result<String> {
        let Some(token) = &self.session else {
            return Err(Error::AuthRequired);
        };

        if !Self::is_expired(token) {
            return Ok(token.access_token.clone());
        }

        match self.exchange.refresh(&token.refresh_token).await {
            Ok(refreshed) => {
                let access_token = refreshed.access_token.clone();
                self.session = Some(refreshed);
                Ok(access_token)
            }
            Err(_) => {
                self.session = None;
                Err(Error::AuthRequired)
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Drops session token state (logout).
    pub fn clear(&mut self) {
        self.session = None;
    }

    fn is_expired(token: &Token) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_LEEWAY_SECS >= token.obtained_at + token.expires_in
    }
}

/// Shared state between a command driving the consent flow and the local
/// callback server completing it.
pub struct AuthSession {
    /// Anti-forgery `state` the callback must echo.
    pub expected_state: String,
    pub tokens: TokenManager,
}

impl AuthSession {
    pub fn new(tokens: TokenManager) -> Self {
        Self {
            expected_state: utils::generate_state(),
            tokens,
        }
    }
}
