//! # ringlru
//!
//! Fixed-capacity, thread-safe LRU cache with a process-wide instance.
//!
//! ## Architecture
//! - **Index**: AHash map from key to value and ring slot (O(1) lookup)
//! - **Ring**: Preallocated circular doubly-linked slots in recency order
//!   (O(1) promotion and eviction, no allocation after construction)
//! - **SharedCache**: One `parking_lot` mutex over index and ring
//! - **Singleton**: [`instance`] builds the shared cache once, with the
//!   capacity of the first caller
//!
//! ## Example
//! ```
//! let cache = ringlru::instance(128).unwrap();
//! cache.put("example.com", "93.184.216.34");
//! assert_eq!(cache.get("example.com").as_deref(), Some("93.184.216.34"));
//! assert_eq!(cache.get("unknown.net"), None);
//! ```

#![warn(missing_docs)]

mod cache;
mod dump;
mod error;
mod global;
mod lru;
mod ring;
mod stats;

pub use cache::SharedCache;
pub use dump::Dump;
pub use error::{Error, Result};
pub use global::{instance, try_instance, CacheCell, StringCache};
pub use lru::{LruCache, Put};
pub use stats::{CacheStats, StatsSnapshot};
