use tabled::Table;

use crate::{
    info,
    management::{SearchHistoryManager, StoreLocation},
    types::HistoryTableRow,
};

pub async fn show_history(store: &StoreLocation, limit: usize) {
    let manager = SearchHistoryManager::new(store.clone());
    let entries = manager.recent().await;

    if entries.is_empty() {
        info!("No searches recorded yet.");
        return;
    }

    // most recent first
    let rows: Vec<HistoryTableRow> = entries
        .iter()
        .rev()
        .take(limit)
        .map(|entry| HistoryTableRow {
            query: entry.query.clone(),
            results: entry.result_count,
            when: entry.timestamp.clone(),
        })
        .collect();
    println!("{}", Table::new(rows));
}
