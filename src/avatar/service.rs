//! Avatar Service
//!
//! Turns names into rendered avatars, caching the encoded bytes.

use tracing::debug;

use crate::avatar::initials::{is_supported, parse_initials, InitialsOptions};
use crate::avatar::render::{render, Encoding};
use crate::avatar::{Color, Palette, DEFAULT_SIZE, MAX_SIZE};
use crate::cache::{BoundedCache, CacheConfig, CacheStats};
use crate::config::Config;
use crate::error::{AvatarError, Result};

// == Initials Avatar ==
/// Renders initials avatars through a bounded byte cache.
///
/// Renders are cached under the extracted initials, not the full name, so
/// every name sharing the same initials gets the first render stored for
/// them (including its color and size) until it is evicted. PNG renders use
/// the bare initials as key; other encodings get their own entries.
#[derive(Debug)]
pub struct InitialsAvatar {
    cache: BoundedCache<String, Vec<u8>>,
    palette: Palette,
    options: InitialsOptions,
}

impl InitialsAvatar {
    // == Constructor ==
    /// Creates a service with the given cache configuration and palette.
    ///
    /// Without a removal hook of its own, the cache logs dropped renders.
    pub fn new(mut cache_config: CacheConfig<String, Vec<u8>>, palette: Palette) -> Self {
        if cache_config.removal_hook.is_none() {
            cache_config = cache_config.with_removal_hook(|item| {
                debug!(initials = %item.key, bytes = item.size, "Dropped cached avatar");
            });
        }
        Self {
            cache: BoundedCache::new(cache_config),
            palette,
            options: InitialsOptions::default(),
        }
    }

    /// Creates a service from the server configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cache_config(), Palette::default())
    }

    pub fn with_options(mut self, options: InitialsOptions) -> Self {
        self.options = options;
        self
    }

    // == Draw ==
    /// Returns the encoded avatar for `name`.
    ///
    /// A `size` of 0 selects the default side length.
    ///
    /// # Errors
    /// - `EmptyName` if the trimmed name is empty
    /// - `UnsupportedCharacter` if the name does not start with a letter
    /// - `InvalidRequest` if `size` is above the maximum
    /// - `Render` if the image cannot be encoded
    pub fn draw_to_bytes(&self, name: &str, size: u32, encoding: Encoding) -> Result<Vec<u8>> {
        let name = name.trim();
        let first = name.chars().next().ok_or(AvatarError::EmptyName)?;
        if !is_supported(first) {
            return Err(AvatarError::UnsupportedCharacter(first));
        }

        let size = if size == 0 { DEFAULT_SIZE } else { size };
        if size > MAX_SIZE {
            return Err(AvatarError::InvalidRequest(format!(
                "Size exceeds maximum of {} pixels",
                MAX_SIZE
            )));
        }

        let initials = self.initials(name);
        let key = cache_key(&initials, encoding);
        if let Some(bytes) = self.cache.get_bytes(&key) {
            debug!(%key, "Avatar cache hit");
            return Ok(bytes);
        }

        let bytes = render(&initials, size, self.color_for(name), encoding)?;
        debug!(%key, size, bytes = bytes.len(), "Rendered avatar");
        self.cache.set_bytes(key, bytes.clone());

        Ok(bytes)
    }

    // == Accessors ==
    /// Returns the initials drawn for `name`.
    pub fn initials(&self, name: &str) -> String {
        parse_initials(name, &self.options)
    }

    /// Returns the background color for `name`.
    pub fn color_for(&self, name: &str) -> Color {
        self.palette.color_for(name)
    }

    pub fn cache(&self) -> &BoundedCache<String, Vec<u8>> {
        &self.cache
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

// Bytes of different encodings must never be served for one another.
fn cache_key(initials: &str, encoding: Encoding) -> String {
    match encoding {
        Encoding::Png => initials.to_string(),
        other => format!("{initials}.{}", other.as_str()),
    }
}
