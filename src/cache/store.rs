//! Cache Store Module
//!
//! Main cache engine combining a key index with the LRU list, byte
//! accounting, capacity enforcement and lazy expiration.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::{CacheConfig, CacheItem, CacheStats, LruList};

// == Inner State ==
// Everything guarded by the cache lock.
struct Inner<K, V> {
    /// Key -> handle into `order`
    index: HashMap<K, usize>,
    /// Items from most (front) to least (back) recently used
    order: LruList<CacheItem<K, V>>,
    /// Sum of `size` over all items
    total_size: u64,
    config: CacheConfig<K, V>,
    stats: CacheStats,
}

// == Bounded Cache ==
/// Thread-safe LRU cache bounded by item count and total byte size.
///
/// Every operation, reads included, takes the same exclusive lock: a read
/// reorders the LRU list. There is no side-effect-free lookup; use
/// [`oldest_item`](Self::oldest_item) or [`items`](Self::items) for
/// inspection without touching recency.
///
/// Expiration is lazy. An expired item is only dropped when it is next read,
/// or when capacity pressure evicts it; until then it still counts against
/// both bounds.
pub struct BoundedCache<K, V> {
    inner: Mutex<Inner<K, V>>,
}

impl<K, V> BoundedCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty cache with the given configuration.
    ///
    /// Nothing is preallocated; `max_items` is only a ceiling.
    pub fn new(config: CacheConfig<K, V>) -> Self {
        let inner = Inner {
            index: HashMap::new(),
            order: LruList::new(),
            total_size: 0,
            config,
            stats: CacheStats::new(),
        };
        Self {
            inner: Mutex::new(inner),
        }
    }

    // == Set ==
    /// Inserts or replaces the value stored under `key`.
    ///
    /// The item becomes most recently used and the capacity bounds are then
    /// enforced, which may evict other items (or this one, if `size` alone
    /// exceeds `max_bytes`).
    ///
    /// # Panics
    /// If adding `size` would overflow the cache's byte total. The cache is
    /// left unchanged in that case.
    pub fn set(&self, key: K, value: V, size: u64) {
        self.inner.lock().set(key, value, size);
    }

    // == Get ==
    /// Returns a copy of the value stored under `key`, marking it most
    /// recently used. Expired items are dropped and read as a miss.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut inner = self.inner.lock();
        let idx = inner.lookup(key)?;
        inner.order.get(idx).map(|item| item.value.clone())
    }

    /// Like [`get`](Self::get) but returns the whole item with its metadata.
    pub fn get_item<Q>(&self, key: &Q) -> Option<CacheItem<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut inner = self.inner.lock();
        let idx = inner.lookup(key)?;
        inner.order.get(idx).cloned()
    }

    // == Oldest Item ==
    /// Returns a copy of the least recently used item.
    ///
    /// Does not reorder, refresh access time, or check expiration.
    pub fn oldest_item(&self) -> Option<CacheItem<K, V>> {
        self.inner.lock().order.back().cloned()
    }

    // == Remove ==
    /// Deletes the item stored under `key`, expired or not.
    ///
    /// Returns whether an item was removed.
    pub fn remove<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut inner = self.inner.lock();
        let Some(&idx) = inner.index.get(key) else {
            return false;
        };
        let removed = inner.remove_at(idx).is_some();
        if removed {
            inner.stats.record_removal();
        }
        removed
    }

    // == Length ==
    /// Returns the number of items, expired ones included.
    pub fn len(&self) -> usize {
        self.inner.lock().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().order.is_empty()
    }

    // == Size ==
    /// Returns the sum of all item sizes in bytes.
    pub fn size(&self) -> u64 {
        self.inner.lock().total_size
    }

    // == Items ==
    /// Returns copies of all items, most recently used first.
    pub fn items(&self) -> Vec<CacheItem<K, V>> {
        let inner = self.inner.lock();
        inner.order.iter().cloned().collect()
    }

    // == Reconfigure ==
    /// Replaces the active configuration and enforces the new bounds
    /// immediately.
    pub fn reconfigure(&self, config: CacheConfig<K, V>) {
        let mut inner = self.inner.lock();
        debug!(
            max_items = config.max_items,
            max_bytes = config.max_bytes,
            "Reconfiguring cache"
        );
        inner.config = config;
        inner.enforce_capacity();
    }

    /// Returns a copy of the active configuration.
    pub fn config(&self) -> CacheConfig<K, V> {
        self.inner.lock().config.clone()
    }

    // == Reset ==
    /// Drops every item without invoking the removal hook.
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.index.clear();
        inner.order.clear();
        inner.total_size = 0;
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        let mut stats = inner.stats.clone();
        stats.set_totals(inner.order.len(), inner.total_size);
        stats
    }
}

// == Byte Values ==
impl<K> BoundedCache<K, Vec<u8>>
where
    K: Hash + Eq + Clone,
{
    /// Stores a byte buffer, using its length as the size.
    pub fn set_bytes(&self, key: K, value: Vec<u8>) {
        let size = value.len() as u64;
        self.set(key, value, size);
    }

    /// Returns a copy of the byte buffer stored under `key`.
    pub fn get_bytes<Q>(&self, key: &Q) -> Option<Vec<u8>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key)
    }
}

impl<K, V> Default for BoundedCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl<K, V> fmt::Debug for BoundedCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("BoundedCache")
            .field("len", &inner.order.len())
            .field("size", &inner.total_size)
            .field("config", &inner.config)
            .finish()
    }
}

impl<K, V> Inner<K, V>
where
    K: Hash + Eq + Clone,
{
    fn set(&mut self, key: K, value: V, size: u64) {
        let existing = self.index.get(&key).copied();
        let old_size = existing
            .and_then(|idx| self.order.get(idx))
            .map_or(0, |item| item.size);

        // Checked before any mutation so a panic leaves the cache intact.
        let base = self.total_size - old_size;
        let Some(total) = base.checked_add(size) else {
            panic!("cache: value size {size} is too big");
        };

        match existing {
            Some(idx) => {
                self.order.move_to_front(idx);
                if let Some(item) = self.order.get_mut(idx) {
                    item.replace(value, size);
                }
            }
            None => {
                let idx = self.order.push_front(CacheItem::new(key.clone(), value, size));
                self.index.insert(key, idx);
            }
        }
        self.total_size = total;

        self.enforce_capacity();
    }

    // Resolves a live, unexpired item and promotes it to the front.
    fn lookup<Q>(&mut self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(&idx) = self.index.get(key) else {
            self.stats.record_miss();
            return None;
        };

        let expiration = self.config.expiration;
        let expired = self
            .order
            .get(idx)
            .is_some_and(|item| item.is_expired(expiration));
        if expired {
            self.remove_at(idx);
            self.stats.record_expiration();
            self.stats.record_miss();
            return None;
        }

        if self.config.track_access_time {
            if let Some(item) = self.order.get_mut(idx) {
                item.touch();
            }
        }
        self.order.move_to_front(idx);
        self.stats.record_hit();
        Some(idx)
    }

    // Drops tail items until both bounds hold.
    fn enforce_capacity(&mut self) {
        while self.config.over_items(self.order.len()) {
            if !self.drop_tail() {
                break;
            }
        }
        while self.config.over_bytes(self.total_size) {
            if !self.drop_tail() {
                break;
            }
        }
    }

    fn drop_tail(&mut self) -> bool {
        let Some(item) = self.order.pop_back() else {
            return false;
        };
        self.index.remove(&item.key);
        self.total_size -= item.size;
        self.stats.record_eviction();
        self.notify(&item);
        true
    }

    fn remove_at(&mut self, idx: usize) -> Option<CacheItem<K, V>> {
        let item = self.order.remove(idx)?;
        self.index.remove(&item.key);
        self.total_size -= item.size;
        self.notify(&item);
        Some(item)
    }

    fn notify(&self, item: &CacheItem<K, V>) {
        if let Some(hook) = &self.config.removal_hook {
            hook(item);
        }
    }
}
