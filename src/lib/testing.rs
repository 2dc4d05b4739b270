//! Helpers shared by the tests.

use std::io::Cursor;
use std::path::PathBuf;

use image::{DynamicImage, ImageFormat};

use crate::resources::Font;
use crate::text::{TextMetrics, TextSize};


/// Directory with the fonts bundled for tests.
pub fn font_directory() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata").join("fonts")
}

/// The font that stands in for the classic caption font.
pub fn test_font() -> Font {
    let bytes = include_bytes!("testdata/fonts/impact.ttf");
    Font::from_bytes("impact", bytes.to_vec()).unwrap()
}

/// Encode an image in given format.
pub fn encode(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = vec![];
    img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
    bytes
}


/// Fake metrics where every character is half the font size wide,
/// and lines are exactly as tall as the font size.
pub struct Monospace;

impl TextMetrics for Monospace {
    fn measure(&self, text: &str, size: u32) -> TextSize {
        let chars = text.chars().count() as u32;
        if chars == 0 {
            return TextSize::default();
        }
        TextSize{width: chars * size / 2, height: size}
    }

    fn line_height(&self, size: u32) -> u32 {
        size
    }
}
