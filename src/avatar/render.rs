//! Render Module
//!
//! Draws an avatar as an SVG document (a colored square with the initials
//! centered in white) and rasterizes it to PNG or JPEG.

use std::fmt::Write as _;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use resvg::{tiny_skia, usvg};

use crate::avatar::Color;
use crate::error::{AvatarError, Result};

/// JPEG quality, matching the usual encoder default
const JPEG_QUALITY: u8 = 75;

// == Encoding ==
/// Output format of a rendered avatar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    #[default]
    Png,
    Jpeg,
    Svg,
}

impl Encoding {
    /// MIME type for the HTTP `Content-Type` header.
    pub fn content_type(self) -> &'static str {
        match self {
            Encoding::Png => "image/png",
            Encoding::Jpeg => "image/jpeg",
            Encoding::Svg => "image/svg+xml",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Encoding::Png => "png",
            Encoding::Jpeg => "jpeg",
            Encoding::Svg => "svg",
        }
    }
}

impl FromStr for Encoding {
    type Err = AvatarError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Encoding::Png),
            "jpeg" => Ok(Encoding::Jpeg),
            "svg" => Ok(Encoding::Svg),
            other => Err(AvatarError::UnsupportedEncoding(other.to_string())),
        }
    }
}

// == Render ==
/// Renders `initials` on a `size` x `size` square filled with `background`.
///
/// # Errors
/// - `Render` if the raster image cannot be produced or encoded
pub fn render(
    initials: &str,
    size: u32,
    background: Color,
    encoding: Encoding,
) -> Result<Vec<u8>> {
    let svg = render_svg(initials, size, background);
    match encoding {
        Encoding::Svg => Ok(svg),
        Encoding::Png => {
            let image = rasterize(&svg, size)?;
            let mut buf = Vec::new();
            PngEncoder::new(&mut buf)
                .write_image(image.as_raw(), size, size, ExtendedColorType::Rgba8)
                .map_err(|e| AvatarError::Render(e.to_string()))?;
            Ok(buf)
        }
        Encoding::Jpeg => {
            // JPEG has no alpha channel; the square is opaque anyway
            let image = DynamicImage::ImageRgba8(rasterize(&svg, size)?).to_rgb8();
            let mut buf = Vec::new();
            JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
                .write_image(image.as_raw(), size, size, ExtendedColorType::Rgb8)
                .map_err(|e| AvatarError::Render(e.to_string()))?;
            Ok(buf)
        }
    }
}

/// Renders the SVG document.
pub fn render_svg(initials: &str, size: u32, background: Color) -> Vec<u8> {
    // Glyphs take up about half the side, shrinking for longer strings
    let glyphs = initials.chars().count().max(1) as f64;
    let font_size = (size as f64 * 0.5 / glyphs.sqrt()).round().max(1.0);
    let center = size as f64 / 2.0;

    let mut svg = String::with_capacity(384);
    let _ = write!(
        svg,
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#,
            r#"<rect width="100%" height="100%" fill="{bg}"/>"#,
            r##"<text x="{c}" y="{c}" fill="#FFFFFF" font-family="sans-serif" font-size="{fs}" "##,
            r#"text-anchor="middle" dominant-baseline="central">{text}</text>"#,
            "</svg>"
        ),
        size = size,
        bg = background,
        c = center,
        fs = font_size,
        text = escape_xml(initials),
    );
    svg.into_bytes()
}

// Draws the SVG document onto a `size` x `size` RGBA buffer.
fn rasterize(svg: &[u8], size: u32) -> Result<RgbaImage> {
    let mut options = usvg::Options::default();
    options.fontdb = font_database();

    let tree = usvg::Tree::from_data(svg, &options)
        .map_err(|e| AvatarError::Render(format!("Failed to parse SVG: {e}")))?;
    let mut pixmap = tiny_skia::Pixmap::new(size, size)
        .ok_or_else(|| AvatarError::Render(format!("Failed to create {size}x{size} pixmap")))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    RgbaImage::from_raw(size, size, pixmap.take())
        .ok_or_else(|| AvatarError::Render("Pixmap does not match image size".to_string()))
}

// System fonts are loaded once and shared by every render.
fn font_database() -> Arc<usvg::fontdb::Database> {
    static FONTS: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            Arc::new(db)
        })
        .clone()
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encoding_from_str() {
        assert_eq!("png".parse::<Encoding>(), Ok(Encoding::Png));
        assert_eq!("JPEG".parse::<Encoding>(), Ok(Encoding::Jpeg));
        assert_eq!("svg".parse::<Encoding>(), Ok(Encoding::Svg));
        assert_eq!("SVG".parse::<Encoding>(), Ok(Encoding::Svg));
        assert_eq!(
            "gif".parse::<Encoding>(),
            Err(AvatarError::UnsupportedEncoding("gif".to_string()))
        );
    }

    #[test]
    fn test_render_svg_document() {
        let bytes = render_svg("JD", 120, Color::rgb(0x45, 0xBD, 0xF3));
        let svg = String::from_utf8(bytes).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"width="120""#));
        assert!(svg.contains(r##"fill="#45BDF3""##));
        assert!(svg.contains(">JD</text>"));
    }

    #[test]
    fn test_render_escapes_text() {
        let bytes = render_svg("<&>", 48, Color::rgb(0, 0, 0));
        let svg = String::from_utf8(bytes).unwrap();

        assert!(svg.contains("&lt;&amp;&gt;"));
        assert!(!svg.contains("<&>"));
    }

    #[test]
    fn test_render_font_scales_with_size() {
        let small = String::from_utf8(render_svg("A", 40, Color::rgb(0, 0, 0))).unwrap();
        let large = String::from_utf8(render_svg("A", 400, Color::rgb(0, 0, 0))).unwrap();

        assert!(small.contains(r#"font-size="20""#));
        assert!(large.contains(r#"font-size="200""#));
    }

    #[test]
    fn test_encoding_defaults_to_png() {
        assert_eq!(Encoding::default(), Encoding::Png);
        assert_eq!(Encoding::Png.content_type(), "image/png");
        assert_eq!(Encoding::Jpeg.content_type(), "image/jpeg");
        assert_eq!(Encoding::Svg.content_type(), "image/svg+xml");
    }

    #[test]
    fn test_render_png() {
        let bytes = render("JD", 64, Color::rgb(0x45, 0xBD, 0xF3), Encoding::Png).unwrap();
        assert!(bytes.starts_with(&PNG_SIGNATURE));

        let image = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(image.dimensions(), (64, 64));
        // Corners are plain background
        assert_eq!(image.get_pixel(0, 0).0, [0x45, 0xBD, 0xF3, 0xFF]);
        assert_eq!(image.get_pixel(63, 63).0, [0x45, 0xBD, 0xF3, 0xFF]);
    }

    #[test]
    fn test_render_jpeg() {
        let bytes = render("JD", 48, Color::rgb(0xF0, 0x62, 0x92), Encoding::Jpeg).unwrap();
        assert!(bytes.starts_with(&[0xFF, 0xD8, 0xFF]));

        let image = image::load_from_memory(&bytes).unwrap();
        assert_eq!((image.width(), image.height()), (48, 48));
    }

    #[test]
    fn test_render_svg_encoding_is_document() {
        let bytes = render("A", 32, Color::rgb(0, 0, 0), Encoding::Svg).unwrap();
        assert_eq!(bytes, render_svg("A", 32, Color::rgb(0, 0, 0)));
    }
}
