use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{management::AuthSession, warning};

/// OAuth redirect target. Rejects callbacks whose `state` does not match
/// the one this session issued, then hands the authorization code to the
/// token manager for the exchange.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(session): Extension<Arc<Mutex<AuthSession>>>,
) -> Html<&'static str> {
    if let Some(reason) = params.get("error") {
        warning!("Authorization was denied: {}", reason);
        return Html("<h4>Authorization denied.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let mut session = session.lock().await;
    if params.get("state").map(String::as_str) != Some(session.expected_state.as_str()) {
        warning!("Callback state mismatch; discarding authorization code.");
        return Html("<h4>State mismatch. Please restart the authorization flow.</h4>");
    }

    match session.tokens.complete_authorization(code).await {
        Ok(()) => Html("<h2>Authorization successful.</h2><p>Close browser window.</p>"),
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
