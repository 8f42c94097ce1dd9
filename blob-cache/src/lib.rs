//! Generic capacity- and age-bounded LRU cache
//!
//! `BlobCache` is a small key→value cache with two independent bounds:
//!
//! - **Capacity**: inserting a new key at capacity evicts the least
//!   recently used entry (the one least recently `get` or `set`).
//! - **Age**: an entry older than the configured TTL is treated as absent
//!   by `get`/`has` and removed as a side effect of the lookup. There is
//!   no background sweep.
//!
//! All operations are synchronous and take `&mut self`; callers that only
//! ever touch the cache from a single logical flow need no locking.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use blob_cache::BlobCache;
//!
//! let mut cache: BlobCache<String, String> =
//!     BlobCache::new(2, Duration::from_secs(3600));
//!
//! cache.set("a".to_string(), "1".to_string());
//! cache.set("b".to_string(), "2".to_string());
//! cache.set("c".to_string(), "3".to_string()); // evicts "a"
//!
//! assert!(cache.get(&"a".to_string()).is_none());
//! assert_eq!(cache.get(&"b".to_string()), Some("2".to_string()));
//! ```

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// A cached value together with the instant it was last stored or touched
struct Entry<V> {
    value: V,
    stored_at: Instant,
}

/// Capacity-bounded, TTL-bounded LRU cache
///
/// Recency order: the key at the front of `order` is the eviction
/// candidate. `get` and `set` move a key to the back and refresh its
/// timestamp; `has` checks expiry without touching recency.
pub struct BlobCache<K, V> {
    entries: HashMap<K, Entry<V>>,
    order: Vec<K>,
    capacity: usize,
    ttl: Duration,
}

impl<K, V> BlobCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a cache holding at most `capacity` entries, each valid for `ttl`
    ///
    /// `capacity` must be at least 1.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        assert!(capacity > 0, "BlobCache capacity must be at least 1");
        Self {
            entries: HashMap::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
            capacity,
            ttl,
        }
    }

    /// Look up a key, refreshing its recency and timestamp on a hit
    ///
    /// An entry older than the TTL is removed and reported as absent.
    pub fn get(&mut self, key: &K) -> Option<V> {
        if self.expire_if_stale(key) {
            return None;
        }
        let entry = self.entries.get_mut(key)?;
        entry.stored_at = Instant::now();
        let value = entry.value.clone();
        self.touch(key);
        Some(value)
    }

    /// Insert or replace a value, evicting the LRU entry if at capacity
    ///
    /// Re-setting an existing key refreshes its recency and timestamp
    /// without triggering an eviction.
    pub fn set(&mut self, key: K, value: V) {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.value = value;
            entry.stored_at = Instant::now();
            self.touch(&key);
            return;
        }

        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.first().cloned() {
                self.entries.remove(&oldest);
                self.order.retain(|k| *k != oldest);
            }
        }

        self.entries.insert(
            key.clone(),
            Entry {
                value,
                stored_at: Instant::now(),
            },
        );
        self.order.push(key);
    }

    /// Check whether a live entry exists for `key`
    ///
    /// Expired entries are removed as a side effect. Unlike `get`, a hit
    /// does not refresh recency.
    pub fn has(&mut self, key: &K) -> bool {
        if self.expire_if_stale(key) {
            return false;
        }
        self.entries.contains_key(key)
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Number of resident entries, including any not yet lazily expired
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move `key` to the most-recently-used position
    fn touch(&mut self, key: &K) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            let k = self.order.remove(pos);
            self.order.push(k);
        }
    }

    /// Drop `key` if its entry has outlived the TTL, returning true if dropped
    fn expire_if_stale(&mut self, key: &K) -> bool {
        let stale = match self.entries.get(key) {
            Some(entry) => entry.stored_at.elapsed() > self.ttl,
            None => false,
        };
        if stale {
            self.entries.remove(key);
            self.order.retain(|k| k != key);
        }
        stale
    }
}
