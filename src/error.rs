//! Application-wide error types.
//!
//! A single taxonomy covers the whole crate: configuration problems that are
//! fatal at startup, the authorization states a caller has to react to, and
//! the remote/store failures that each layer either absorbs or surfaces.
//!
//! Propagation policy: read calls against the catalog service degrade to
//! empty results at the client boundary (logged, never propagated), while
//! mutation failures are always surfaced as [`Error::RemoteMutation`].

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or invalid static configuration. Fatal at startup or at
    /// client construction, never recovered at runtime.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No valid delegated token is held for this session. The caller must
    /// send the user through the authorization flow.
    #[error("authorization required")]
    AuthRequired,

    /// The authorization-code exchange was rejected by the accounts service.
    #[error("authorization code exchange failed: {0}")]
    AuthExchangeFailed(String),

    /// Transport or catalog-service failure on a read call.
    #[error("catalog request failed: {0}")]
    Remote(String),

    /// Failure on a write call against the catalog service. Always reported
    /// to the caller, never swallowed.
    #[error("catalog mutation failed: {0}")]
    RemoteMutation(String),

    /// Lookup miss, local or remote.
    #[error("not found: {0}")]
    NotFound(String),

    /// File I/O error in the local store.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error in the local store.
    #[error("store serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Remote(err.to_string())
    }
}
