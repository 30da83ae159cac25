//! Process-wide shared cache
//!
//! The first successful call to [`instance`] fixes the capacity for the life
//! of the process. Later calls return the same cache and ignore their
//! argument. Hand the returned `&'static` handle to collaborators instead of
//! calling `instance` from every call site.

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::cache::SharedCache;
use crate::error::Result;

/// Cache type held by the process singleton
pub type StringCache = SharedCache<String, String>;

static GLOBAL: CacheCell = CacheCell::new();

/// One-time-initialized slot for a [`StringCache`]
pub struct CacheCell {
    cell: OnceCell<StringCache>,
}

impl CacheCell {
    /// Create an empty cell
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Return the cache, constructing it with `capacity` if the cell is empty.
    ///
    /// Racing callers block until exactly one of them has constructed the
    /// cache; all of them then see that instance. A failed construction
    /// leaves the cell empty.
    ///
    /// # Errors
    /// * `Error::ZeroCapacity` - the cell is empty and `capacity` is zero
    pub fn get_or_init(&self, capacity: usize) -> Result<&StringCache> {
        self.cell.get_or_try_init(|| {
            let cache = SharedCache::new(capacity)?;
            debug!(capacity, "constructed shared LRU cache");
            Ok(cache)
        })
    }

    /// The cache, if already constructed
    pub fn get(&self) -> Option<&StringCache> {
        self.cell.get()
    }
}

impl Default for CacheCell {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide cache, constructed with `capacity` on first call
///
/// # Errors
/// * `Error::ZeroCapacity` - no cache exists yet and `capacity` is zero
pub fn instance(capacity: usize) -> Result<&'static StringCache> {
    GLOBAL.get_or_init(capacity)
}

/// The process-wide cache, if some caller has already constructed it
pub fn try_instance() -> Option<&'static StringCache> {
    GLOBAL.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn test_cell_zero_capacity_leaves_cell_empty() {
        let cell = CacheCell::new();

        assert!(matches!(cell.get_or_init(0), Err(Error::ZeroCapacity)));
        assert!(cell.get().is_none());

        let cache = cell.get_or_init(3).unwrap();
        assert_eq!(cache.capacity(), 3);
    }

    #[test]
    fn test_cell_first_capacity_wins() {
        let cell = CacheCell::new();

        let first = cell.get_or_init(5).unwrap();
        first.put("k", "v");
        let second = cell.get_or_init(50).unwrap();

        assert!(std::ptr::eq(first, second));
        assert_eq!(second.capacity(), 5);
        assert_eq!(second.get("k").as_deref(), Some("v"));

        // Once built, the argument is ignored entirely
        assert!(cell.get_or_init(0).is_ok());
    }

    #[test]
    fn test_cell_racing_first_callers() {
        let cell = Arc::new(CacheCell::new());
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (1..=8)
            .map(|capacity| {
                let cell = Arc::clone(&cell);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    let cache = cell.get_or_init(capacity).unwrap();
                    (cache as *const StringCache as usize, cache.capacity())
                })
            })
            .collect();

        let seen: Vec<(usize, usize)> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let (addr, capacity) = seen[0];
        assert!(seen.iter().all(|&(a, c)| a == addr && c == capacity));
        assert!((1..=8).contains(&capacity));
    }
}
