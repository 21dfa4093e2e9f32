use std::sync::{
    Arc,
    atomic::{AtomicU64, AtomicUsize, Ordering},
};

use chrono::Utc;
use spofavcli::config::Config;
use spofavcli::error::Error;
use spofavcli::management::{AuthorizationExchange, PlaylistOrchestrator, TokenManager};
use spofavcli::types::Token;

/// Scripted stand-in for the accounts service. Counts calls and lets the
/// test steer the lifetime of issued tokens and whether refresh succeeds.
struct FakeExchange {
    exchange_calls: Arc<AtomicUsize>,
    refresh_calls: Arc<AtomicUsize>,
    issued_expires_in: Arc<AtomicU64>,
    refresh_succeeds: bool,
}

struct FakeHandles {
    exchange_calls: Arc<AtomicUsize>,
    refresh_calls: Arc<AtomicUsize>,
    issued_expires_in: Arc<AtomicU64>,
}

fn fake_exchange(expires_in: u64, refresh_succeeds: bool) -> (FakeExchange, FakeHandles) {
    let exchange_calls = Arc::new(AtomicUsize::new(0));
    let refresh_calls = Arc::new(AtomicUsize::new(0));
    let issued_expires_in = Arc::new(AtomicU64::new(expires_in));
    let fake = FakeExchange {
        exchange_calls: Arc::clone(&exchange_calls),
        refresh_calls: Arc::clone(&refresh_calls),
        issued_expires_in: Arc::clone(&issued_expires_in),
        refresh_succeeds,
    };
    let handles = FakeHandles {
        exchange_calls,
        refresh_calls,
        issued_expires_in,
    };
    (fake, handles)
}

fn issued_token(access: &str, expires_in: u64) -> Token {
    Token {
        access_token: access.to_string(),
        refresh_token: "refresh-1".to_string(),
        scope: "playlist-modify-public".to_string(),
        expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    }
}

#[async_trait::async_trait]
impl AuthorizationExchange for FakeExchange {
    async fn exchange_code(&self, code: &str) -> spofavcli::Result<Token> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        if code == "bad-code" {
            return Err(Error::AuthExchangeFailed("invalid code".to_string()));
        }
        Ok(issued_token(
            "initial-access",
            self.issued_expires_in.load(Ordering::SeqCst),
        ))
    }

    async fn refresh(&self, _refresh_token: &str) -> spofavcli::Result<Token> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        if !self.refresh_succeeds {
            return Err(Error::Remote("refresh rejected".to_string()));
        }
        Ok(issued_token("refreshed-access", 3600))
    }
}

fn test_config() -> Config {
    Config {
        client_id: "client-123".to_string(),
        client_secret: "secret-456".to_string(),
        redirect_uri: "http://127.0.0.1:9/callback".to_string(),
        // closed port: any remote call made by mistake fails loudly
        api_url: "http://127.0.0.1:9/api".to_string(),
        auth_url: "https://accounts.example/authorize".to_string(),
        token_url: "http://127.0.0.1:9/token".to_string(),
        scope: "playlist-modify-public playlist-modify-private".to_string(),
        server_addr: "127.0.0.1:9".to_string(),
    }
}

#[tokio::test]
async fn test_current_token_requires_authorization() {
    let (fake, _handles) = fake_exchange(3600, true);
    let mut manager = TokenManager::new(Box::new(fake));

    assert!(!manager.is_authenticated());
    assert!(matches!(
        manager.current_token().await,
        Err(Error::AuthRequired)
    ));
}

#[tokio::test]
async fn test_complete_authorization_stores_session_token() {
    let (fake, handles) = fake_exchange(3600, true);
    let mut manager = TokenManager::new(Box::new(fake));

    manager.complete_authorization("good-code").await.unwrap();
    assert!(manager.is_authenticated());

    let access = manager.current_token().await.unwrap();
    assert_eq!(access, "initial-access");
    // a valid token is returned as-is, no refresh happens
    assert_eq!(handles.refresh_calls.load(Ordering::SeqCst), 0);
    assert_eq!(handles.exchange_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_rejected_code_reports_exchange_failure() {
    let (fake, _handles) = fake_exchange(3600, true);
    let mut manager = TokenManager::new(Box::new(fake));

    let result = manager.complete_authorization("bad-code").await;
    assert!(matches!(result, Err(Error::AuthExchangeFailed(_))));
    assert!(!manager.is_authenticated());
}

#[tokio::test]
async fn test_expired_token_triggers_exactly_one_refresh() {
    // expires_in 0: the issued token is already past expiry
    let (fake, handles) = fake_exchange(0, true);
    let mut manager = TokenManager::new(Box::new(fake));
    manager.complete_authorization("good-code").await.unwrap();

    let access = manager.current_token().await.unwrap();
    assert_eq!(access, "refreshed-access");
    assert_eq!(handles.refresh_calls.load(Ordering::SeqCst), 1);

    // the refreshed token replaced session state; no second refresh
    let access = manager.current_token().await.unwrap();
    assert_eq!(access, "refreshed-access");
    assert_eq!(handles.refresh_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_refresh_requires_reauthorization() {
    let (fake, handles) = fake_exchange(0, false);
    let mut manager = TokenManager::new(Box::new(fake));
    manager.complete_authorization("good-code").await.unwrap();

    assert!(matches!(
        manager.current_token().await,
        Err(Error::AuthRequired)
    ));

    // the session was dropped: subsequent calls report AuthRequired
    // without hitting the refresh endpoint again
    assert!(matches!(
        manager.current_token().await,
        Err(Error::AuthRequired)
    ));
    assert_eq!(handles.refresh_calls.load(Ordering::SeqCst), 1);

    // a fresh authorization restores the session
    handles.issued_expires_in.store(3600, Ordering::SeqCst);
    manager.complete_authorization("good-code").await.unwrap();
    assert_eq!(manager.current_token().await.unwrap(), "initial-access");
}

#[tokio::test]
async fn test_clear_drops_session_state() {
    let (fake, _handles) = fake_exchange(3600, true);
    let mut manager = TokenManager::new(Box::new(fake));
    manager.complete_authorization("good-code").await.unwrap();

    manager.clear();

    assert!(!manager.is_authenticated());
    assert!(matches!(
        manager.current_token().await,
        Err(Error::AuthRequired)
    ));
}

#[test]
fn test_begin_authorization_builds_consent_url() {
    let config = test_config();
    let url = TokenManager::begin_authorization(&config, "state-abc");

    assert!(url.starts_with("https://accounts.example/authorize?"));
    assert!(url.contains("client_id=client-123"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("state=state-abc"));
    // redirect URI and scope are percent-encoded
    assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A9%2Fcallback"));
    assert!(url.contains("scope=playlist-modify-public%20playlist-modify-private"));
}

#[tokio::test]
async fn test_create_playlist_without_authorization_reports_auth_required() {
    let config = test_config();
    let (fake, handles) = fake_exchange(3600, true);
    let mut manager = TokenManager::new(Box::new(fake));

    let mut orchestrator = PlaylistOrchestrator::new(&config, &mut manager);
    let result = orchestrator
        .create_playlist("user-1", "My Playlist", false, "")
        .await;

    assert!(matches!(result, Err(Error::AuthRequired)));
    // no exchange, no refresh, and the config points at a closed port so
    // any remote call would have failed differently
    assert_eq!(handles.exchange_calls.load(Ordering::SeqCst), 0);
    assert_eq!(handles.refresh_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_playlist_reads_without_authorization_report_auth_required() {
    let config = test_config();
    let (fake, _handles) = fake_exchange(3600, true);
    let mut manager = TokenManager::new(Box::new(fake));

    let mut orchestrator = PlaylistOrchestrator::new(&config, &mut manager);
    assert!(matches!(
        orchestrator.list_my_playlists().await,
        Err(Error::AuthRequired)
    ));
    assert!(matches!(
        orchestrator.add_tracks("p1", &["spotify:track:t1".to_string()]).await,
        Err(Error::AuthRequired)
    ));
}
