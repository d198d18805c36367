//! Integration Tests for the Bounded Cache
//!
//! Exercises the public cache API the way consumers use it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use initials_avatar::{BoundedCache, CacheConfig};

#[test]
fn test_recently_read_item_survives_eviction() {
    let cache: BoundedCache<&str, i32> = BoundedCache::new(CacheConfig::new().with_max_items(3));
    cache.set("one", 1, 0);
    cache.set("two", 2, 0);
    cache.set("three", 3, 0);

    assert_eq!(cache.get("two"), Some(2));
    cache.set("four", 4, 0);

    assert_eq!(cache.get("one"), None);
    assert_eq!(cache.get("two"), Some(2));
    assert_eq!(cache.get("three"), Some(3));
    assert_eq!(cache.get("four"), Some(4));
}

#[test]
fn test_expired_item_reads_as_miss() {
    let cache: BoundedCache<&str, &str> =
        BoundedCache::new(CacheConfig::new().with_expiration(Duration::from_millis(1)));
    cache.set("hello", "world", 0);

    thread::sleep(Duration::from_millis(2));

    assert_eq!(cache.get("hello"), None);
}

#[test]
fn test_byte_bound_evicts_oldest_once() {
    let removed = Arc::new(AtomicUsize::new(0));
    let counter = removed.clone();
    let cache: BoundedCache<String, Vec<u8>> = BoundedCache::new(
        CacheConfig::new()
            .with_max_bytes(1000)
            .with_removal_hook(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
    );

    let buf = vec![0u8; 100];
    for i in 0..11 {
        cache.set_bytes(i.to_string(), buf.clone());
    }

    assert!(cache.get_bytes("0").is_none());
    for i in 1..11 {
        assert!(cache.get_bytes(i.to_string().as_str()).is_some());
    }
    assert_eq!(removed.load(Ordering::SeqCst), 1);
}

#[test]
fn test_hooks_fire_oldest_first() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let sink = order.clone();
    let cache = BoundedCache::new(
        CacheConfig::<String, u32>::new()
            .with_max_bytes(100)
            .with_removal_hook(move |item| sink.lock().unwrap().push(item.key.clone())),
    );

    for key in ["a", "b", "c", "d"] {
        cache.set(key.to_string(), 0, 30);
    }
    // Inserting d dropped a; big then drops b, c and d
    cache.set("big".to_string(), 0, 80);

    assert_eq!(*order.lock().unwrap(), vec!["a", "b", "c", "d"]);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.size(), 80);
}

#[test]
fn test_items_snapshot_and_size_agree() {
    let cache: BoundedCache<String, String> = BoundedCache::default();
    for (i, word) in ["alpha", "beta", "gamma"].iter().enumerate() {
        cache.set(word.to_string(), word.to_uppercase(), (i as u64 + 1) * 10);
    }
    cache.get("alpha");

    let items = cache.items();
    let keys: Vec<&str> = items.iter().map(|it| it.key.as_str()).collect();
    assert_eq!(keys, vec!["alpha", "gamma", "beta"]);
    assert_eq!(items.iter().map(|it| it.size).sum::<u64>(), cache.size());
    assert_eq!(cache.size(), 60);
}

#[test]
fn test_shared_across_threads() {
    let cache = Arc::new(BoundedCache::<u32, Vec<u8>>::new(
        CacheConfig::new().with_max_items(32),
    ));

    let handles: Vec<_> = (0..4u32)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..200u32 {
                    let key = (t * 1000 + i) % 64;
                    if cache.get_bytes(&key).is_none() {
                        cache.set_bytes(key, vec![t as u8; (i % 16) as usize]);
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert!(cache.len() <= 32);
    let items = cache.items();
    assert_eq!(items.len(), cache.len());
    assert_eq!(items.iter().map(|it| it.size).sum::<u64>(), cache.size());
}
