//! SharedCache: LRU cache behind a single exclusive lock

use std::borrow::Borrow;
use std::hash::Hash;

use parking_lot::Mutex;
use tracing::trace;

use crate::dump::Dump;
use crate::error::Result;
use crate::lru::{LruCache, Put};
use crate::stats::CacheStats;

/// Thread-safe bounded LRU cache.
///
/// Every operation holds one mutex over the index and ring for its whole
/// duration, so callers never observe a partially applied mutation. Lock
/// hold time is O(1) for `get` and `put`.
pub struct SharedCache<K, V> {
    /// Index + eviction ring
    inner: Mutex<LruCache<K, V>>,

    /// Cache statistics
    stats: CacheStats,

    /// Cache capacity
    capacity: usize,
}

impl<K, V> SharedCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a new shared cache with the given capacity
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries
    ///
    /// # Returns
    /// * `Result<SharedCache>` - `Error::ZeroCapacity` when `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            inner: Mutex::new(LruCache::new(capacity)?),
            stats: CacheStats::new(),
            capacity,
        })
    }

    /// Look up a key, marking it most recently used on a hit
    ///
    /// # Returns
    /// * `Option<V>` - Clone of the stored value, `None` on a miss
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let value = self.inner.lock().get(key).cloned();

        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    /// Insert or overwrite a value, evicting the least recently used entry
    /// when the cache is full
    pub fn put(&self, key: impl Into<K>, value: impl Into<V>) {
        let outcome = self.inner.lock().put(key.into(), value.into());

        match outcome {
            Put::Inserted => self.stats.record_insert(),
            Put::Updated => self.stats.record_update(),
            Put::Evicted(..) => {
                trace!("evicted least recently used entry");
                self.stats.record_insert();
                self.stats.record_eviction();
            }
        }
    }

    /// Snapshot recency order and contents (diagnostics only)
    pub fn dump(&self) -> Dump<K, V> {
        self.inner.lock().dump()
    }

    /// Verify the index/ring back-reference invariant under the lock
    pub fn check_invariants(&self) -> Result<()> {
        self.inner.lock().check_invariants()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get current cache size
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
