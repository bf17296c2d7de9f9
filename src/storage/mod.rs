//! Key-value persistence behind an injected trait
//!
//! Values are stored as JSON strings under typed keys, so callers never
//! touch raw strings and tests can swap in [`MemoryStore`].

#[cfg(test)]
mod memory;
mod sqlite;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use thiserror::Error;

#[cfg(test)]
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::board::Board;
use crate::books::Book;
use crate::history::SearchHistoryItem;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(#[from] rusqlite::Error),

    #[error("failed to create store directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored value for '{key}' is not valid: {source}")]
    Decode {
        key: &'static str,
        source: serde_json::Error,
    },

    #[error("failed to encode value for '{key}': {source}")]
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },
}

/// Raw string storage
pub trait Store {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// A store key bound to the type of value it holds
pub struct Key<T> {
    name: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _value: PhantomData,
        }
    }
}

/// Last search results, used to resolve a book by id
pub const SEARCH_RESULTS: Key<Vec<Book>> = Key::new("searchResults");
pub const SEARCH_HISTORY: Key<Vec<SearchHistoryItem>> = Key::new("searchHistory");
pub const PALETTE: Key<String> = Key::new("coverly.palette");
pub const BOARD: Key<Board> = Key::new("coverly.board");

/// JSON (de)serialization on top of any [`Store`]
pub trait TypedStore: Store {
    fn get<T: DeserializeOwned>(&self, key: &Key<T>) -> Result<Option<T>, StoreError> {
        match self.get_raw(key.name)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StoreError::Decode {
                    key: key.name,
                    source,
                }),
            None => Ok(None),
        }
    }

    fn set<T: Serialize>(&self, key: &Key<T>, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.name,
            source,
        })?;
        self.set_raw(key.name, &raw)
    }

    fn clear<T>(&self, key: &Key<T>) -> Result<(), StoreError> {
        self.remove(key.name)
    }
}

impl<S: Store + ?Sized> TypedStore for S {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_round_trip_and_clear() {
        let store = MemoryStore::new();
        assert!(store.get(&PALETTE).unwrap().is_none());

        store.set(&PALETTE, &"ocean".to_string()).unwrap();
        assert_eq!(store.get_raw("coverly.palette").unwrap().unwrap(), "\"ocean\"");
        assert_eq!(store.get(&PALETTE).unwrap().unwrap(), "ocean");

        store.clear(&PALETTE).unwrap();
        assert!(store.get(&PALETTE).unwrap().is_none());
    }

    #[test]
    fn test_malformed_value_reports_key() {
        let store = MemoryStore::new();
        store.set_raw("searchHistory", "{not json").unwrap();
        let err = store.get(&SEARCH_HISTORY).unwrap_err();
        assert!(err.to_string().contains("searchHistory"));
    }
}
