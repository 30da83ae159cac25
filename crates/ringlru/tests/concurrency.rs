// ==============================================
// SHARED CACHE CONCURRENCY TESTS (integration)
// ==============================================
//
// Multi-threaded get/put against one SharedCache. Every check runs after the
// workers have joined, through the cache's own API.

use std::sync::{Arc, Barrier};
use std::thread;

use ringlru::SharedCache;

fn hammer(cache: &Arc<SharedCache<String, String>>, threads: usize, ops: usize, keyspace: usize) {
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let cache = Arc::clone(cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for j in 0..ops {
                    let key = format!("host-{}", (j * 31 + t * 17) % keyspace);
                    if cache.get(key.as_str()).is_none() {
                        cache.put(key, format!("{}:{}", t, j));
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn overlapping_keys_never_exceed_capacity() {
    let cache = Arc::new(SharedCache::new(10).unwrap());

    hammer(&cache, 8, 5_000, 1_000);

    assert_eq!(cache.len(), 10);
    assert!(cache.check_invariants().is_ok());

    let dump = cache.dump();
    assert_eq!(dump.order.len(), 10);
    assert_eq!(dump.entries.len(), 10);
    for key in &dump.order {
        assert!(dump.entries_map().contains_key(key));
    }
}

#[test]
fn stats_agree_with_operation_mix() {
    let cache = Arc::new(SharedCache::new(64).unwrap());

    hammer(&cache, 4, 2_000, 200);

    let stats = cache.stats().snapshot();
    assert_eq!(stats.hits + stats.misses, 4 * 2_000);
    // Every miss is followed by exactly one put
    assert_eq!(stats.inserts + stats.updates, stats.misses);
    assert_eq!(stats.inserts - stats.evictions, cache.len() as u64);
}

#[test]
fn keyspace_smaller_than_capacity_is_all_hits_once_warm() {
    let cache = Arc::new(SharedCache::new(128).unwrap());

    hammer(&cache, 4, 1_000, 50);
    cache.stats().reset();
    hammer(&cache, 4, 1_000, 50);

    assert_eq!(cache.len(), 50);
    assert_eq!(cache.stats().misses(), 0);
    assert_eq!(cache.stats().hit_ratio(), 1.0);
}

#[test]
fn dump_is_consistent_while_writers_run() {
    let cache = Arc::new(SharedCache::new(16).unwrap());
    let writer_cache = Arc::clone(&cache);

    let writer = thread::spawn(move || hammer(&writer_cache, 4, 2_000, 500));

    for _ in 0..200 {
        let dump = cache.dump();
        assert!(dump.order.len() <= 16);
        assert_eq!(dump.order.len(), dump.entries.len());
    }

    writer.join().unwrap();
    assert!(cache.check_invariants().is_ok());
}
