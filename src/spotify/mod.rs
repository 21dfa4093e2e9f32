//! # Spotify Integration Module
//!
//! The single boundary between the application and the Spotify Web API. It
//! owns HTTP communication, both authorization grants, response decoding,
//! and the translation of raw API payloads into the domain records in
//! [`crate::types`].
//!
//! ## Layout
//!
//! - [`auth`] - accounts-service calls: client-credentials app tokens, the
//!   authorization-code exchange, token refresh, and the interactive
//!   consent flow that drives the local callback server.
//! - [`client`] - [`CatalogClient`] construction in its two authorization
//!   modes (app-level and user-delegated) plus the shared request plumbing.
//! - [`search`] - public read operations: track/artist search, track
//!   lookup, an artist's top tracks.
//! - [`playlist`] - the delegated surface: current user, playlist listing
//!   and fetch, playlist creation, batch track add/remove.
//!
//! ## Error policy
//!
//! Read operations never leak transport errors to callers: failures are
//! logged with `warning!` and degrade to empty results so a render path
//! can't be taken down by a flaky remote. Mutations surface
//! [`crate::error::Error::RemoteMutation`] with the HTTP status and
//! response body. Rate-limit responses honor `Retry-After` once, following
//! the service's guidance, before the request is given up on.

pub mod auth;
pub mod client;
pub mod playlist;
pub mod search;

pub use client::CatalogClient;
