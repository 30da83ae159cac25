// ==============================================
// PROCESS SINGLETON (integration)
// ==============================================
//
// The singleton is process-global, so the whole lifecycle runs as a single
// test in its own binary.

use std::sync::{Arc, Barrier};
use std::thread;

use ringlru::{instance, try_instance, Error, StringCache};

#[test]
fn singleton_lifecycle() {
    // Zero capacity is rejected and builds nothing
    assert!(matches!(instance(0), Err(Error::ZeroCapacity)));
    assert!(try_instance().is_none());

    // Racing first callers agree on one instance and one capacity
    let barrier = Arc::new(Barrier::new(6));
    let handles: Vec<_> = (0..6)
        .map(|i| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let cache = instance(10 + i).unwrap();
                cache.put(format!("thread-{}", i), i.to_string());
                cache as *const StringCache as usize
            })
        })
        .collect();

    let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(addrs.iter().all(|&addr| addr == addrs[0]));

    let cache = try_instance().unwrap();
    let capacity = cache.capacity();
    assert!((10..16).contains(&capacity));
    assert_eq!(cache.len(), 6);

    // Later capacities, zero included, are ignored
    let again = instance(1).unwrap();
    assert!(std::ptr::eq(cache, again));
    assert_eq!(again.capacity(), capacity);
    assert!(std::ptr::eq(instance(0).unwrap(), cache));

    // LRU behavior through the shared handle
    for i in 0..capacity * 2 {
        cache.put(format!("fill-{}", i), "x");
    }
    assert_eq!(cache.len(), capacity);
    assert_eq!(cache.get("thread-0"), None);
    assert!(cache.check_invariants().is_ok());
}
