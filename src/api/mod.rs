//! # API Module
//!
//! HTTP endpoints for the local callback server that backs the delegated
//! authorization flow.
//!
//! - [`callback`] - receives the accounts-service redirect, verifies the
//!   anti-forgery `state`, and completes the authorization-code exchange
//!   on the shared session.
//! - [`health`] - health check returning application status and version.
//!
//! Built on [Axum](https://docs.rs/axum); each endpoint is an async
//! function wired into the router in [`crate::server`].

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
