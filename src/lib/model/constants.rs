//! Module defining constants relevant to the data model.

use super::types::{Color, FontChoice, TextPosition};


/// Font used when the request doesn't choose one.
pub const DEFAULT_FONT: FontChoice = FontChoice::Classic;
/// Which caption slots are used when the request doesn't say.
pub const DEFAULT_POSITION: TextPosition = TextPosition::Both;

/// Fill color of the classic (Impact-like) captions.
pub const CLASSIC_COLOR: Color = Color(0xff, 0xff, 0xff);
/// Fill color of the "unique" (bubblegum) captions.
pub const UNIQUE_COLOR: Color = Color(0xff, 0xa5, 0x00);
/// Color of the text outline, for every font.
pub const DEFAULT_OUTLINE_COLOR: Color = Color(0x0, 0x0, 0x0);


/// Maximum length (in Unicode codepoints) of a single caption text.
pub const MAX_CAPTION_LENGTH: usize = 256;

/// Maximum side of the square the image can be cropped to.
pub const MAX_TARGET_SIZE: u32 = 4096;
