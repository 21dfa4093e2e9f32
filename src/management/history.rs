use chrono::Utc;

use crate::{error::Result, management::StoreLocation, types::SearchHistoryEntry};

/// The history file keeps at most this many entries.
const HISTORY_LIMIT: usize = 100;

/// Append-only search history, capped to the most recent entries (oldest
/// dropped first). Same whole-file rewrite model and corruption tolerance
/// as the favorites store.
pub struct SearchHistoryManager {
    location: StoreLocation,
}

impl SearchHistoryManager {
    pub fn new(location: StoreLocation) -> Self {
        Self { location }
    }

    /// Recorded searches, oldest first.
    pub async fn recent(&self) -> Vec<SearchHistoryEntry> {
        let content = match async_fs::read_to_string(self.location.history_path()).await {
            Ok(content) => content,
            Err(_) => return Vec::new(),
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Appends one search and truncates the history to the cap.
    pub async fn record(&self, query: &str, result_count: u64) -> Result<()> {
        let mut entries = self.recent().await;
        entries.push(SearchHistoryEntry {
            query: query.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            result_count,
        });

        if entries.len() > HISTORY_LIMIT {
            let excess = entries.len() - HISTORY_LIMIT;
            entries.drain(..excess);
        }

        self.location.ensure_layout().await?;
        let json = serde_json::to_string_pretty(&entries)?;
        async_fs::write(self.location.history_path(), json).await?;
        Ok(())
    }
}
