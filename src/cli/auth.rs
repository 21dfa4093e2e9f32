use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{config::Config, error, management::AuthSession, spotify, success};

pub async fn auth(config: &Config, session: Arc<Mutex<AuthSession>>) {
    match spotify::auth::authorize(config, session).await {
        Ok(()) => success!("Authorization successful!"),
        Err(_) => error!("Authorization failed or timed out."),
    }
}
