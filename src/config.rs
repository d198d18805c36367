//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of cached avatars (0 = unlimited)
    pub max_items: usize,
    /// Maximum total size of cached avatars in bytes (0 = unlimited)
    pub max_bytes: u64,
    /// Seconds after which a cached avatar is re-rendered (0 = never)
    pub expiration_secs: u64,
    /// Track last access time of cached avatars
    pub track_access_time: bool,
    /// HTTP server port
    pub server_port: u16,
    /// Side length used when a request does not specify one
    pub default_avatar_size: u32,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ITEMS` - Maximum cached avatars (default: 1024)
    /// - `MAX_BYTES` - Maximum cached bytes (default: 0, unlimited)
    /// - `EXPIRATION_SECS` - Cache expiration in seconds (default: 0, never)
    /// - `TRACK_ACCESS_TIME` - Record access times (default: false)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DEFAULT_AVATAR_SIZE` - Default avatar side length (default: 120)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Creates a Config from an arbitrary variable source.
    ///
    /// Missing or unparsable values fall back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            max_items: parse_or(lookup("MAX_ITEMS"), defaults.max_items),
            max_bytes: parse_or(lookup("MAX_BYTES"), defaults.max_bytes),
            expiration_secs: parse_or(lookup("EXPIRATION_SECS"), defaults.expiration_secs),
            track_access_time: parse_or(lookup("TRACK_ACCESS_TIME"), defaults.track_access_time),
            server_port: parse_or(lookup("SERVER_PORT"), defaults.server_port),
            default_avatar_size: parse_or(
                lookup("DEFAULT_AVATAR_SIZE"),
                defaults.default_avatar_size,
            ),
        }
    }

    /// Builds the cache configuration described by this config.
    pub fn cache_config<K, V>(&self) -> CacheConfig<K, V> {
        let mut config = CacheConfig::new()
            .with_max_items(self.max_items)
            .with_max_bytes(self.max_bytes)
            .with_access_time_tracking(self.track_access_time);
        if self.expiration_secs > 0 {
            config = config.with_expiration(Duration::from_secs(self.expiration_secs));
        }
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_items: 1024,
            max_bytes: 0,
            expiration_secs: 0,
            track_access_time: false,
            server_port: 3000,
            default_avatar_size: 120,
        }
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_items, 1024);
        assert_eq!(config.max_bytes, 0);
        assert_eq!(config.expiration_secs, 0);
        assert!(!config.track_access_time);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.default_avatar_size, 120);
    }

    #[test]
    fn test_config_from_lookup_defaults() {
        assert_eq!(Config::from_lookup(|_| None), Config::default());
    }

    #[test]
    fn test_config_from_lookup_values() {
        let vars: HashMap<&str, &str> = [
            ("MAX_ITEMS", "64"),
            ("MAX_BYTES", " 4096 "),
            ("EXPIRATION_SECS", "30"),
            ("TRACK_ACCESS_TIME", "true"),
            ("SERVER_PORT", "8080"),
            ("DEFAULT_AVATAR_SIZE", "not a number"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.max_items, 64);
        assert_eq!(config.max_bytes, 4096);
        assert_eq!(config.expiration_secs, 30);
        assert!(config.track_access_time);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.default_avatar_size, 120);
    }

    #[test]
    fn test_parse_or_falls_back() {
        assert_eq!(parse_or(Some(" 8080 ".to_string()), 1u16), 8080);
        assert!(!parse_or(Some("yes".to_string()), false));
        assert_eq!(parse_or(None, 7u32), 7);
    }

    #[test]
    fn test_cache_config_mapping() {
        let config = Config {
            max_bytes: 4096,
            expiration_secs: 30,
            track_access_time: true,
            ..Config::default()
        };

        let cache: CacheConfig<String, Vec<u8>> = config.cache_config();
        assert_eq!(cache.max_items, 1024);
        assert_eq!(cache.max_bytes, 4096);
        assert!(cache.track_access_time);
        assert_eq!(cache.expiration, Some(Duration::from_secs(30)));

        let never: CacheConfig<String, Vec<u8>> = Config::default().cache_config();
        assert!(never.expiration.is_none());
    }
}
