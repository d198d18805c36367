//! Avatar Module
//!
//! Initials extraction, color assignment and rendering, on top of the cache.

pub mod initials;
mod palette;
pub mod render;
mod service;

pub use initials::{parse_initials, InitialsOptions};
pub use palette::{Color, Palette, DEFAULT_COLOR, PALETTE};
pub use render::Encoding;
pub use service::InitialsAvatar;

// == Public Constants ==
/// Side length used when a caller passes 0
pub const DEFAULT_SIZE: u32 = 48;

/// Largest side length that will be rendered
pub const MAX_SIZE: u32 = 1024;
