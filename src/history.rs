//! Recent searches, newest first

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::storage::{StoreError, TypedStore, SEARCH_HISTORY};

pub const MAX_HISTORY: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHistoryItem {
    pub id: String,
    pub query: String,
    pub author: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl SearchHistoryItem {
    pub fn new(query: &str, author: &str, now: DateTime<Utc>) -> Self {
        let timestamp = now.timestamp_millis();
        Self {
            id: timestamp.to_string(),
            query: query.to_string(),
            author: author.to_string(),
            timestamp,
        }
    }

    fn same_search(&self, query: &str, author: &str) -> bool {
        self.query.to_lowercase() == query.to_lowercase()
            && self.author.to_lowercase() == author.to_lowercase()
    }

    /// "dd/mm HH:MM" in local time
    pub fn display_time(&self) -> String {
        match Local.timestamp_millis_opt(self.timestamp).single() {
            Some(time) => time.format("%d/%m %H:%M").to_string(),
            None => String::from("--/-- --:--"),
        }
    }
}

/// Put `item` at the front, dropping any case-insensitive duplicate and
/// anything past [`MAX_HISTORY`]
pub fn push_front(history: Vec<SearchHistoryItem>, item: SearchHistoryItem) -> Vec<SearchHistoryItem> {
    let mut updated = Vec::with_capacity(MAX_HISTORY);
    let (query, author) = (item.query.clone(), item.author.clone());
    updated.push(item);
    updated.extend(
        history
            .into_iter()
            .filter(|existing| !existing.same_search(&query, &author)),
    );
    updated.truncate(MAX_HISTORY);
    updated
}

/// Load history; unreadable data is logged and treated as empty
pub fn load<S: TypedStore + ?Sized>(store: &S) -> Result<Vec<SearchHistoryItem>, StoreError> {
    match store.get(&SEARCH_HISTORY) {
        Ok(history) => Ok(history.unwrap_or_default()),
        Err(StoreError::Decode { source, .. }) => {
            warn!("ignoring unreadable search history: {}", source);
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

/// Record a search and persist the updated history
pub fn record<S: TypedStore + ?Sized>(
    store: &S,
    query: &str,
    author: &str,
    now: DateTime<Utc>,
) -> Result<Vec<SearchHistoryItem>, StoreError> {
    let updated = push_front(load(store)?, SearchHistoryItem::new(query, author, now));
    store.set(&SEARCH_HISTORY, &updated)?;
    Ok(updated)
}

pub fn clear<S: TypedStore + ?Sized>(store: &S) -> Result<(), StoreError> {
    store.clear(&SEARCH_HISTORY)
}
