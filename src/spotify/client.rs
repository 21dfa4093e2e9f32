use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{
    config::Config,
    error::{Error, Result},
    spotify,
};

/// Longest `Retry-After` delay the client will honor before giving up.
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Client for the Spotify Web API, constructed explicitly in one of two
/// authorization modes and passed into the layers that need it.
///
/// - [`CatalogClient::app`] holds an app-level token from the
///   client-credentials grant; enough for public search and lookups.
/// - [`CatalogClient::delegated`] holds a user-delegated access token and
///   is required for playlist mutation and current-user reads. Callers
///   obtain that token through the token lifecycle manager; the client
///   never refreshes it.
pub struct CatalogClient {
    http: Client,
    api_url: String,
    access_token: String,
}

impl CatalogClient {
    /// Constructs an app-level client by exchanging the configured
    /// credentials for an app token. Endpoint failure is a [`Error::Remote`]
    /// at construction; missing credentials were already rejected when the
    /// [`Config`] was built.
    pub async fn app(config: &Config) -> Result<Self> {
        let access_token = spotify::auth::request_app_token(config).await?;
        Ok(Self::delegated(config, access_token))
    }

    /// Constructs a user-delegated client from a valid (possibly
    /// just-refreshed) access token.
    pub fn delegated(config: &Config, access_token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: config.api_url.clone(),
            access_token: access_token.into(),
        }
    }

    pub(crate) fn api_url(&self) -> &str {
        &self.api_url
    }

    /// GET an API resource and decode it. Honors one `Retry-After` pause on
    /// 429, maps 404 to [`Error::NotFound`], everything else non-2xx to
    /// [`Error::Remote`].
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut retried = false;

        loop {
            let response = self
                .http
                .get(url)
                .bearer_auth(&self.access_token)
                .send()
                .await
                .map_err(|e| Error::Remote(e.to_string()))?;

            if response.status() == StatusCode::TOO_MANY_REQUESTS && !retried {
                let retry_after = retry_after_secs(&response);
                if retry_after <= MAX_RETRY_AFTER_SECS {
                    sleep(Duration::from_secs(retry_after)).await;
                    retried = true;
                    continue;
                }
            }

            if response.status() == StatusCode::NOT_FOUND {
                return Err(Error::NotFound(url.to_string()));
            }

            let response = response
                .error_for_status()
                .map_err(|e| Error::Remote(e.to_string()))?;

            return response
                .json::<T>()
                .await
                .map_err(|e| Error::Remote(e.to_string()));
        }
    }

    /// Turns a non-success mutation response into [`Error::RemoteMutation`]
    /// carrying the status and response body.
    pub(crate) async fn check_mutation(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::RemoteMutation(format!("HTTP {status}: {body}")))
    }

    pub(crate) fn bearer(&self) -> &str {
        &self.access_token
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
}

fn retry_after_secs(response: &Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0)
}
