//! Cache Item Module
//!
//! Defines a single cached record and the snapshot handed out to callers.

use std::time::{Duration, Instant};

// == Cache Item ==
/// A cached key/value pair with its byte cost and timestamps.
///
/// Values returned from `get_item`, `oldest_item`, `items` and the removal
/// hook are copies; mutating them has no effect on the cache.
#[derive(Debug, Clone)]
pub struct CacheItem<K, V> {
    /// The key this item is stored under
    pub key: K,
    /// The stored value
    pub value: V,
    /// Byte size attributed to the value
    pub size: u64,
    /// When the value was last written
    pub mod_time: Instant,
    /// When the value was last read (or written)
    pub access_time: Instant,
}

impl<K, V> CacheItem<K, V> {
    // == Constructor ==
    /// Creates a new item stamped with the current time.
    pub fn new(key: K, value: V, size: u64) -> Self {
        let now = Instant::now();
        Self {
            key,
            value,
            size,
            mod_time: now,
            access_time: now,
        }
    }

    // == Replace ==
    /// Overwrites value and size, refreshing both timestamps.
    pub(crate) fn replace(&mut self, value: V, size: u64) {
        let now = Instant::now();
        self.value = value;
        self.size = size;
        self.mod_time = now;
        self.access_time = now;
    }

    // == Touch ==
    /// Refreshes the access time.
    pub(crate) fn touch(&mut self) {
        self.access_time = Instant::now();
    }

    // == Age ==
    /// Time elapsed since the value was last written.
    pub fn age(&self) -> Duration {
        self.mod_time.elapsed()
    }

    /// Time elapsed since the value was last accessed.
    pub fn idle(&self) -> Duration {
        self.access_time.elapsed()
    }

    // == Is Expired ==
    /// Checks whether the item is older than the given expiration window.
    ///
    /// A `None` or zero window never expires. The boundary is exclusive:
    /// an item exactly `window` old is still fresh.
    pub fn is_expired(&self, window: Option<Duration>) -> bool {
        match window {
            Some(window) if !window.is_zero() => self.age() > window,
            _ => false,
        }
    }
}
