use std::collections::{HashMap, HashSet};

use rand::{Rng, distr::Alphanumeric};

use crate::types::Track;

/// Generates the random `state` parameter carried through the consent flow
/// to tie the callback to the request that started it.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Formats a track length as `M:SS`.
pub fn format_track_duration(ms: u64) -> String {
    let total_seconds = ms / 1000;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Formats an accumulated playtime as `{H}h {M}min`, or `{M}min` when the
/// total stays under one hour.
pub fn format_total_duration(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;

    if hours > 0 {
        format!("{}h {}min", hours, minutes)
    } else {
        format!("{}min", minutes)
    }
}

/// Drops tracks whose id was already seen, keeping the first occurrence.
pub fn remove_duplicate_tracks(tracks: &mut Vec<Track>) {
    let mut seen_ids = HashSet::new();
    tracks.retain(|track| seen_ids.insert(track.id.clone()));
}

/// Counts favorites per artist display string and returns the `limit` most
/// frequent, descending. Ties keep first-encountered order.
pub fn top_artists(tracks: &[Track], limit: usize) -> Vec<(String, u64)> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for track in tracks {
        if !counts.contains_key(&track.artist) {
            order.push(track.artist.clone());
        }
        *counts.entry(track.artist.clone()).or_insert(0) += 1;
    }

    // stable sort keeps insertion order within equal counts
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order
        .into_iter()
        .take(limit)
        .map(|artist| {
            let count = counts[&artist];
            (artist, count)
        })
        .collect()
}

/// Mean popularity across tracks; 0 for an empty slice.
pub fn mean_popularity(tracks: &[Track]) -> f64 {
    if tracks.is_empty() {
        return 0.0;
    }
    let sum: u64 = tracks.iter().map(|t| t.popularity as u64).sum();
    sum as f64 / tracks.len() as f64
}
