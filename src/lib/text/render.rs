//! Drawing placed lines onto the canvas.

use image::{Pixel, RgbaImage};
use rusttype::{point, Scale};

use crate::canvas::Canvas;
use crate::model::{Color, FontChoice};
use crate::resources::Font;
use super::layout::PlacedLine;


/// How the caption text is painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Style {
    pub fill: Color,
    pub outline: Color,
    /// Offset (in pixels) of the outline stamps. Zero disables the outline.
    pub outline_width: u32,
}

impl Style {
    /// Style matching given font choice.
    #[inline]
    pub fn for_font(font: FontChoice, outline_width: u32) -> Self {
        Style{fill: font.color(), outline: font.outline_color(), outline_width}
    }
}


/// Render the lines onto the canvas.
///
/// Every line is first stamped in the outline color at the eight offsets
/// `(dx, dy)` with `dx, dy ∈ {-w, 0, w}` (excluding the origin),
/// and then drawn once more in the fill color at its actual position.
///
/// Drawing is additive: rendering the same lines twice thickens the result.
pub fn render(canvas: &mut Canvas, lines: &[PlacedLine], font: &Font, style: &Style) {
    let image = canvas.image_mut();
    for line in lines {
        trace!("Rendering line {:?} at ({}, {}), size {}",
            line.text, line.x, line.y, line.font_size);

        if style.outline_width > 0 {
            let w = style.outline_width as i32;
            for &dy in &[-w, 0, w] {
                for &dx in &[-w, 0, w] {
                    if (dx, dy) != (0, 0) {
                        draw_line(image, line, dx, dy, font, style.outline);
                    }
                }
            }
        }
        draw_line(image, line, 0, 0, font, style.fill);
    }
}

fn draw_line(image: &mut RgbaImage, line: &PlacedLine, dx: i32, dy: i32,
             font: &Font, color: Color) {
    let (width, height) = image.dimensions();
    let scale = Scale::uniform(line.font_size as f32);
    let ascent = font.v_metrics(scale).ascent;
    let origin = point((line.x + dx) as f32, (line.y + dy) as f32 + ascent);

    for glyph in font.layout(&line.text, scale, origin) {
        let bb = match glyph.pixel_bounding_box() {
            Some(bb) => bb,
            None => continue,
        };
        glyph.draw(|gx, gy, coverage| {
            let x = bb.min.x + gx as i32;
            let y = bb.min.y + gy as i32;
            if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                return;
            }
            let alpha = (coverage.min(1.0) * 255.0).round() as u8;
            if alpha == 0 {
                return;
            }
            image.get_pixel_mut(x as u32, y as u32).blend(&color.to_rgba(alpha));
        });
    }
}
