//! Positioning fitted lines on the canvas.

use crate::model::Slot;
use super::fit::FittedText;


/// Distances (in pixels) kept between the caption text and the canvas edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct Margins {
    /// Distance of the first top line from the top edge.
    pub top: u32,
    /// Distance of the last bottom line from the bottom edge.
    pub bottom: u32,
    /// Vertical gap between consecutive lines of the same caption.
    pub gap: u32,
}

impl Default for Margins {
    fn default() -> Self {
        Margins{top: 10, bottom: 20, gap: 5}
    }
}


/// A line of text with its drawing origin (top-left corner of the line box).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedLine {
    pub text: String,
    /// Horizontal offset; negative if the line is wider than the canvas.
    pub x: i32,
    pub y: i32,
    pub font_size: u32,
}


/// Compute the drawing positions of fitted lines anchored at given slot.
///
/// Every line is centered horizontally.
/// Top captions flow downwards from `margins.top`, while bottom captions
/// are stacked so that the last line ends `margins.bottom` pixels above the edge
/// (but never start above the top of the canvas).
pub fn layout(fitted: &FittedText, canvas_width: u32, canvas_height: u32,
              anchor: Slot, margins: &Margins) -> Vec<PlacedLine> {
    let count = fitted.lines.len() as i64;
    if count == 0 {
        return vec![];
    }
    let line_height = fitted.line_height as i64;
    let step = line_height + margins.gap as i64;

    let start_y = match anchor {
        Slot::Top => margins.top as i64,
        Slot::Bottom => {
            let block_height = count * line_height + (count - 1) * margins.gap as i64;
            (canvas_height as i64 - block_height - margins.bottom as i64).max(0)
        }
    };
    trace!("Laying out {} line(s) of {:?} caption starting at y={}", count, anchor, start_y);

    fitted.lines.iter().enumerate().map(|(i, line)| {
        let x = (canvas_width as i64 - line.width as i64).div_euclid(2);
        let y = start_y + i as i64 * step;
        PlacedLine{
            text: line.text.clone(),
            x: x as i32,
            y: y as i32,
            font_size: fitted.font_size,
        }
    }).collect()
}
