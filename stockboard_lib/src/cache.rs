//! In-memory TTL cache backed by `DashMap` for concurrent access.
//!
//! Keys are query signatures, values are serialized JSON. The cache is
//! process-local; it is not shared across processes or hosts.

use std::time::{Duration, Instant};

use dashmap::DashMap;

struct CacheEntry {
    value: String,
    inserted_at: Instant,
}

/// Thread-safe in-memory cache with time-to-live expiration.
///
/// Expired entries are evicted lazily, on the next `get` for that key.
/// There is no background sweeper and no size bound; entries only leave
/// via expiry-on-read or [`MemoryCache::clear`].
pub struct MemoryCache {
    store: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl MemoryCache {
    /// Creates a new cache whose entries expire `ttl` after insertion.
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: DashMap::new(),
            ttl,
        }
    }

    /// Returns the cached value for `key`, or `None` if missing or expired.
    pub fn get(&self, key: &str) -> Option<String> {
        let entry = self.store.get(key)?;
        if entry.inserted_at.elapsed() > self.ttl {
            drop(entry);
            self.store.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    /// Inserts or overwrites an entry, restarting its TTL.
    pub fn set(&self, key: String, value: String) {
        self.store.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Number of entries currently held, including not-yet-evicted expired ones.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        cache.set("quotes:a".to_string(), "[1,2]".to_string());
        assert_eq!(cache.get("quotes:a"), Some("[1,2]".to_string()));
    }

    #[test]
    fn missing_key_is_none() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        assert_eq!(cache.get("quotes:missing"), None);
    }

    #[test]
    fn expired_entry_is_evicted_on_read() {
        let cache = MemoryCache::new(Duration::from_millis(1));
        cache.set("quotes:a".to_string(), "[]".to_string());
        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(cache.get("quotes:a"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn overwrite_restarts_ttl() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        cache.set("k".to_string(), "old".to_string());
        cache.set("k".to_string(), "new".to_string());
        assert_eq!(cache.get("k"), Some("new".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_drops_everything() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        cache.set("a".to_string(), "1".to_string());
        cache.set("b".to_string(), "2".to_string());
        cache.clear();
        assert!(cache.is_empty());
    }
}
