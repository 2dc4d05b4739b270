//! Measuring text.

use std::collections::BTreeSet;

use itertools::Itertools;
use rusttype::{point, GlyphId, Scale};

use crate::resources::Font;


/// Pixel dimensions of a piece of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextSize {
    pub width: u32,
    pub height: u32,
}

/// Source of text measurements at a given font size.
///
/// Wrapping and fitting only ever need these two numbers,
/// so they're generic over this trait rather than tied to a real font.
pub trait TextMetrics {
    /// Bounding box of the text at given size.
    ///
    /// Width is the right edge of the inked glyphs when laid out from x = 0,
    /// height is their bottom edge measured from the top of the line.
    fn measure(&self, text: &str, size: u32) -> TextSize;

    /// Height of a single line of text at given size.
    fn line_height(&self, size: u32) -> u32;
}

impl TextMetrics for Font {
    fn measure(&self, text: &str, size: u32) -> TextSize {
        if text.is_empty() || size == 0 {
            return TextSize::default();
        }
        let scale = Scale::uniform(size as f32);
        let ascent = self.v_metrics(scale).ascent;

        let (right, bottom) = self.layout(text, scale, point(0.0, ascent))
            .filter_map(|g| g.pixel_bounding_box())
            .fold((0, 0), |(r, b), bb| (r.max(bb.max.x), b.max(bb.max.y)));
        TextSize{width: right.max(0) as u32, height: bottom.max(0) as u32}
    }

    fn line_height(&self, size: u32) -> u32 {
        let v_metrics = self.v_metrics(Scale::uniform(size as f32));
        (v_metrics.ascent - v_metrics.descent).ceil().max(1.0) as u32
    }
}


/// Check if given font has all the glyphs for given text.
/// Missing glyphs are rendered as blanks (or boxes), so this only logs a warning.
pub fn check(font: &Font, text: &str) {
    let missing: BTreeSet<_> = text.chars()
        .filter(|c| !c.is_whitespace())
        .filter(|&c| font.glyph(c).id() == GlyphId(0))
        .map(|c| c as u32)
        .collect();
    if !missing.is_empty() {
        warn!("Font `{}` is missing glyphs for {} codepoint(s): {}",
            font.name(), missing.len(),
            missing.iter().map(|c| format!("{:#x}", c)).join(", "));
    }
}
