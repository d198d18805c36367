//! Request DTOs for the avatar server API
//!
//! Defines the structure of incoming query parameters.

use serde::Deserialize;

use crate::avatar::{Encoding, MAX_SIZE};
use crate::error::{AvatarError, Result};

/// Query parameters of `GET /avatar/:name`
///
/// # Fields
/// - `size`: Side length in pixels (server default if not specified)
/// - `encoding`: Image encoding name (`png` if not specified)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvatarQuery {
    /// Side length in pixels
    #[serde(default)]
    pub size: Option<u32>,
    /// Image encoding
    #[serde(default)]
    pub encoding: Option<String>,
}

impl AvatarQuery {
    /// Validates the query and resolves it against the server default size.
    pub fn resolve(&self, default_size: u32) -> Result<(u32, Encoding)> {
        let size = self.size.unwrap_or(default_size);
        if size > MAX_SIZE {
            return Err(AvatarError::InvalidRequest(format!(
                "Size exceeds maximum of {} pixels",
                MAX_SIZE
            )));
        }
        let encoding = match &self.encoding {
            Some(name) => name.parse::<Encoding>()?,
            None => Encoding::default(),
        };
        Ok((size, encoding))
    }
}
