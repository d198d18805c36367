//! Palette Module
//!
//! Deterministic background color selection using a consistent-hash ring.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound::{Excluded, Unbounded};

/// Background colors as RGB hex codes.
pub const PALETTE: [&str; 9] = [
    "45BDF3", "E08F70", "4DB6AC", "9575CD", "B0855E", "F06292", "A3D36C", "7986CB", "F1B91D",
];

/// Color used when the ring is empty.
pub const DEFAULT_COLOR: Color = Color::rgb(0x45, 0xBD, 0xF3);

/// Virtual points per color on the ring
const REPLICAS: usize = 20;

// == Color ==
/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a six-digit hex code such as `"45BDF3"`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

// == Palette ==
/// Immutable hash ring mapping names to colors.
///
/// Built once at startup and shared read-only; the same name always maps to
/// the same color for a given set of colors, and adding or removing a color
/// only remaps the names that hashed near it.
#[derive(Debug, Clone)]
pub struct Palette {
    ring: BTreeMap<u32, Color>,
    colors: usize,
}

impl Palette {
    /// Builds a ring over the given colors.
    pub fn new(colors: impl IntoIterator<Item = Color>) -> Self {
        let mut ring = BTreeMap::new();
        let mut count = 0;
        for color in colors {
            count += 1;
            let code = format!("{:02X}{:02X}{:02X}", color.r, color.g, color.b);
            for replica in 0..REPLICAS {
                ring.insert(hash_key(&format!("{replica}{code}")), color);
            }
        }
        Self {
            ring,
            colors: count,
        }
    }

    /// Returns the color for `name`.
    ///
    /// The owner is the first ring point strictly after the name's hash,
    /// wrapping around to the lowest point.
    pub fn color_for(&self, name: &str) -> Color {
        let point = hash_key(name);
        self.ring
            .range((Excluded(point), Unbounded))
            .next()
            .or_else(|| self.ring.iter().next())
            .map_or(DEFAULT_COLOR, |(_, color)| *color)
    }

    pub fn len(&self) -> usize {
        self.colors
    }

    pub fn is_empty(&self) -> bool {
        self.colors == 0
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(PALETTE.iter().filter_map(|hex| Color::from_hex(hex)))
    }
}

// CRC-32 (IEEE) of the key bytes.
fn hash_key(key: &str) -> u32 {
    crc32fast::hash(key.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("45BDF3"), Some(Color::rgb(69, 189, 243)));
        assert_eq!(Color::from_hex("#F1B91D"), Some(Color::rgb(241, 185, 29)));
        assert_eq!(Color::from_hex("xyz"), None);
        assert_eq!(Color::from_hex("GGGGGG"), None);
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::rgb(224, 143, 112).to_string(), "#E08F70");
    }

    #[test]
    fn test_default_palette() {
        let palette = Palette::default();
        assert_eq!(palette.len(), PALETTE.len());
    }

    #[test]
    fn test_color_is_deterministic() {
        let a = Palette::default();
        let b = Palette::default();

        for name in ["John Doe", "孔子", "jane@example.org", ""] {
            assert_eq!(a.color_for(name), b.color_for(name));
        }
    }

    #[test]
    fn test_color_comes_from_palette() {
        let palette = Palette::default();
        let allowed: Vec<Color> = PALETTE.iter().filter_map(|h| Color::from_hex(h)).collect();

        for i in 0..100 {
            let color = palette.color_for(&format!("user {i}"));
            assert!(allowed.contains(&color));
        }
    }

    #[test]
    fn test_colors_are_spread() {
        let palette = Palette::default();
        let distinct: std::collections::HashSet<Color> = (0..200)
            .map(|i| palette.color_for(&format!("name-{i}")))
            .collect();

        assert!(distinct.len() > 1);
    }

    #[test]
    fn test_known_name_colors() {
        let palette = Palette::default();
        let cases = [
            ("Swordsmen", "45BDF3"),
            ("Alice", "7986CB"),
            ("John Doe", "F1B91D"),
            ("Ada", "7986CB"),
            ("jane@example.org", "9575CD"),
        ];

        for (name, hex) in cases {
            assert_eq!(palette.color_for(name), Color::from_hex(hex).unwrap(), "{name}");
        }
    }

    #[test]
    fn test_hash_key_is_crc32_ieee() {
        assert_eq!(hash_key("123456789"), 0xCBF4_3926);
        assert_eq!(hash_key(""), 0);
    }

    #[test]
    fn test_hash_past_last_point_wraps() {
        let palette = Palette::default();
        let (&last, _) = palette.ring.iter().next_back().unwrap();
        let (_, &first_color) = palette.ring.iter().next().unwrap();

        assert!(hash_key("user 159") > last);
        assert_eq!(palette.color_for("user 159"), first_color);
        assert_eq!(first_color, Color::from_hex("7986CB").unwrap());
    }

    #[test]
    fn test_empty_palette_uses_default() {
        let palette = Palette::new(Vec::new());
        assert!(palette.is_empty());
        assert_eq!(palette.color_for("anyone"), DEFAULT_COLOR);
    }
}
