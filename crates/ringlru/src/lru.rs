//! LRU (Least Recently Used) cache implementation
//!
//! A hash index maps each key to its value and to the ring slot that records
//! its recency. Lookup, promotion and eviction are all O(1), and no slots are
//! allocated after construction.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;

use crate::dump::Dump;
use crate::error::{Error, Result};
use crate::ring::{Ring, SlotId};

/// Index entry: stored value plus its position in the ring
struct Entry<V> {
    value: V,
    slot: SlotId,
}

/// Outcome of [`LruCache::put`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Put<K, V> {
    /// Key was new and a free slot was claimed
    Inserted,
    /// Key was present; value overwritten and promoted
    Updated,
    /// Key was new and the least recently used entry made room for it
    Evicted(K, V),
}

/// LRU cache with fixed capacity
pub struct LruCache<K, V> {
    map: HashMap<K, Entry<V>, RandomState>,
    ring: Ring<K>,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache with the given capacity
    ///
    /// # Errors
    /// * [`Error::ZeroCapacity`] - `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }

        Ok(Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            ring: Ring::new(capacity),
        })
    }

    /// Get a value from the cache, marking it most recently used
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entry = self.map.get(key)?;
        self.ring.move_to_front(entry.slot);
        Some(&entry.value)
    }

    /// Get a value without touching its recency
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).map(|entry| &entry.value)
    }

    /// Check whether a key is cached, without touching its recency
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Insert or overwrite a key-value pair.
    ///
    /// Overwriting counts as a use. Inserting into a full cache reuses the
    /// least recently used entry's slot.
    pub fn put(&mut self, key: K, value: V) -> Put<K, V> {
        if let Some(entry) = self.map.get_mut(&key) {
            entry.value = value;
            self.ring.move_to_front(entry.slot);
            return Put::Updated;
        }

        debug_assert_eq!(self.ring.len(), self.map.len());
        let (slot, displaced) = self.ring.claim(key.clone());
        let outcome = match displaced.and_then(|old_key| self.map.remove_entry(&old_key)) {
            Some((old_key, old)) => Put::Evicted(old_key, old.value),
            None => Put::Inserted,
        };

        self.map.insert(key, Entry { value, slot });
        outcome
    }

    /// Get the current size of the cache
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Snapshot the recency order and every entry
    pub fn dump(&self) -> Dump<K, V>
    where
        V: Clone,
    {
        Dump {
            order: self.ring.iter().map(|(_, key)| key.clone()).collect(),
            entries: self
                .map
                .iter()
                .map(|(key, entry)| (key.clone(), entry.value.clone()))
                .collect(),
        }
    }

    /// Verify ring links and the index/ring back-references
    pub fn check_invariants(&self) -> Result<()> {
        self.ring.check_links()?;

        if self.map.len() > self.capacity() {
            return Err(Error::invariant(format!(
                "{} entries exceed capacity {}",
                self.map.len(),
                self.capacity()
            )));
        }

        if self.map.len() != self.ring.len() {
            return Err(Error::invariant(format!(
                "index holds {} entries but ring holds {}",
                self.map.len(),
                self.ring.len()
            )));
        }

        if self.ring.iter().last().map(|(slot, _)| slot) != self.ring.tail() {
            return Err(Error::invariant("tail is not the least recent slot"));
        }

        for (slot, key) in self.ring.iter() {
            match self.map.get(key) {
                Some(entry) if entry.slot == slot => {}
                Some(entry) => {
                    return Err(Error::invariant(format!(
                        "{:?} key maps to {:?}",
                        slot, entry.slot
                    )))
                }
                None => {
                    return Err(Error::invariant(format!(
                        "{:?} key missing from index",
                        slot
                    )))
                }
            }
        }

        for (key, entry) in &self.map {
            if self.ring.key(entry.slot) != Some(key) {
                return Err(Error::invariant(format!(
                    "index entry points at {:?} holding another key",
                    entry.slot
                )));
            }
        }

        Ok(())
    }
}
