//! # CLI Module
//!
//! User-facing command implementations. Each command wires configuration,
//! the catalog client, the local store, and (for playlist operations) the
//! session token manager together, handles progress feedback, and renders
//! results as tables.
//!
//! ## Commands
//!
//! - [`auth`] - runs the delegated-authorization consent flow
//! - [`search`] - track-mode or artist-mode catalog search; every search
//!   is recorded in the local history
//! - [`list_favorites`] / [`add_favorite`] / [`remove_favorite`] /
//!   [`favorites_stats`] - the locally persisted favorites list
//! - [`show_history`] - recent recorded searches
//! - [`list_playlists`] / [`show_playlist`] / [`create_playlist`] /
//!   [`add_playlist_tracks`] / [`remove_playlist_tracks`] - playlist
//!   management on the user's Spotify account
//!
//! Commands print through the `info!`/`success!`/`warning!`/`error!`
//! macros; `error!` terminates, so it is reserved for unrecoverable
//! situations like missing configuration or a failed authorization flow.

mod auth;
mod favorites;
mod history;
mod playlist;
mod search;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use auth::auth;
pub use favorites::{add_favorite, favorites_stats, list_favorites, remove_favorite};
pub use history::show_history;
pub use playlist::{
    add_playlist_tracks, create_playlist, list_playlists, remove_playlist_tracks, show_playlist,
};
pub use search::search;

pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
