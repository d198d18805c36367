//! Cache Module
//!
//! Bounded in-memory LRU cache with item and byte limits, lazy expiration
//! and a synchronous removal hook.

mod config;
mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use config::{CacheConfig, RemovalHook};
pub use entry::CacheItem;
pub use lru::LruList;
pub use stats::CacheStats;
pub use store::BoundedCache;
