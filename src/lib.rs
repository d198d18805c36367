//! Initials Avatar - avatar images drawn from a name's initials
//!
//! Rendered avatars are kept in a bounded LRU cache limited by item count
//! and total byte size, with optional lazy expiration.

pub mod api;
pub mod avatar;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use avatar::InitialsAvatar;
pub use cache::{BoundedCache, CacheConfig, CacheItem};
pub use config::Config;
pub use error::AvatarError;
