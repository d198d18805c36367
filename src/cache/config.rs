//! Cache Configuration Module
//!
//! Capacity, expiration and notification settings for a [`BoundedCache`].
//!
//! [`BoundedCache`]: crate::cache::BoundedCache

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::CacheItem;

/// Callback invoked with each item dropped from the cache.
///
/// Runs synchronously while the cache lock is held. It must not call back
/// into the cache and should return quickly.
pub type RemovalHook<K, V> = Arc<dyn Fn(&CacheItem<K, V>) + Send + Sync>;

// == Cache Config ==
/// Active configuration of a cache. Zero values disable the matching bound.
pub struct CacheConfig<K, V> {
    /// Maximum number of items (0 = unlimited)
    pub max_items: usize,
    /// Maximum sum of item sizes in bytes (0 = unlimited)
    pub max_bytes: u64,
    /// Refresh `access_time` on every successful read
    pub track_access_time: bool,
    /// Age after which an item reads as a miss (None or zero = never)
    pub expiration: Option<Duration>,
    /// Notified of every evicted, expired or removed item
    pub removal_hook: Option<RemovalHook<K, V>>,
}

impl<K, V> CacheConfig<K, V> {
    // == Constructor ==
    /// Creates an unbounded configuration with no expiration and no hook.
    pub fn new() -> Self {
        Self {
            max_items: 0,
            max_bytes: 0,
            track_access_time: false,
            expiration: None,
            removal_hook: None,
        }
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn with_access_time_tracking(mut self, enabled: bool) -> Self {
        self.track_access_time = enabled;
        self
    }

    pub fn with_expiration(mut self, expiration: Duration) -> Self {
        self.expiration = Some(expiration);
        self
    }

    /// Installs the removal hook.
    pub fn with_removal_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&CacheItem<K, V>) + Send + Sync + 'static,
    {
        self.removal_hook = Some(Arc::new(hook));
        self
    }

    // == Limits ==
    /// Returns true if `count` items exceed the item bound.
    pub(crate) fn over_items(&self, count: usize) -> bool {
        self.max_items > 0 && count > self.max_items
    }

    /// Returns true if `bytes` exceed the byte bound.
    pub(crate) fn over_bytes(&self, bytes: u64) -> bool {
        self.max_bytes > 0 && bytes > self.max_bytes
    }
}

impl<K, V> Default for CacheConfig<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// Manual impls: the hook is shared, so K and V need not be Clone or Debug.
impl<K, V> Clone for CacheConfig<K, V> {
    fn clone(&self) -> Self {
        Self {
            max_items: self.max_items,
            max_bytes: self.max_bytes,
            track_access_time: self.track_access_time,
            expiration: self.expiration,
            removal_hook: self.removal_hook.clone(),
        }
    }
}

impl<K, V> fmt::Debug for CacheConfig<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheConfig")
            .field("max_items", &self.max_items)
            .field("max_bytes", &self.max_bytes)
            .field("track_access_time", &self.track_access_time)
            .field("expiration", &self.expiration)
            .field("removal_hook", &self.removal_hook.is_some())
            .finish()
    }
}
