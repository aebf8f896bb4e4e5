//! Local cache for favorites
//!
//! A durable, synchronous key-value fallback used when the remote store is
//! unreachable. The storage itself sits behind [`KeyValueStore`] so callers
//! inject either a file-backed store or an in-memory fake.

mod file;
mod memory;

use std::sync::Arc;

use crate::error::Result;
use crate::models::{Quote, QuoteId};

pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;

/// Storage key holding the serialized favorites sequence
pub const FAVORITES_KEY: &str = "favorites";
/// Storage key holding the serialized pinned-id sequence
pub const PINNED_KEY: &str = "pinned";

/// Small key-value port the local cache persists through
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `None` when absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Typed full-value access to the favorites and pinned-id entries
#[derive(Clone)]
pub struct LocalCache {
    store: Arc<dyn KeyValueStore>,
}

impl LocalCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Cache backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryKeyValueStore::new()))
    }

    pub fn favorites(&self) -> Result<Vec<Quote>> {
        self.read(FAVORITES_KEY)
    }

    pub fn set_favorites(&self, favorites: &[Quote]) -> Result<()> {
        self.write(FAVORITES_KEY, favorites)
    }

    pub fn pinned_ids(&self) -> Result<Vec<QuoteId>> {
        self.read(PINNED_KEY)
    }

    pub fn set_pinned_ids(&self, ids: &[QuoteId]) -> Result<()> {
        self.write(PINNED_KEY, ids)
    }

    fn read<T: serde::de::DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        match self.store.get(key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(T::default()),
        }
    }

    fn write<T: serde::Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::NewQuote;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_keys_read_as_empty() {
        let cache = LocalCache::in_memory();
        assert!(cache.favorites().unwrap().is_empty());
        assert!(cache.pinned_ids().unwrap().is_empty());
    }

    #[test]
    fn favorites_and_pinned_are_independent_values() {
        let cache = LocalCache::in_memory();
        let quote = Quote::from_new(
            QuoteId::local(),
            &NewQuote::new("Be water.", "Bruce Lee", Vec::new()).unwrap(),
        );

        cache.set_favorites(std::slice::from_ref(&quote)).unwrap();
        assert_eq!(cache.favorites().unwrap(), vec![quote.clone()]);
        assert!(cache.pinned_ids().unwrap().is_empty());

        cache.set_pinned_ids(std::slice::from_ref(&quote.id)).unwrap();
        assert_eq!(cache.pinned_ids().unwrap(), vec![quote.id.clone()]);
        assert_eq!(cache.favorites().unwrap(), vec![quote]);
    }

    #[test]
    fn malformed_value_is_serialization_error() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store.set(FAVORITES_KEY, "{not json").unwrap();
        let cache = LocalCache::new(store);
        assert!(matches!(cache.favorites(), Err(Error::Serialization(_))));
    }
}
