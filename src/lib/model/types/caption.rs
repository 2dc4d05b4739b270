//! Module implementing the `Caption` type and the enums it's made of.

use std::fmt;

use crate::model::constants::{CLASSIC_COLOR, DEFAULT_FONT, DEFAULT_OUTLINE_COLOR, UNIQUE_COLOR};
use super::color::Color;


/// Placement of a caption on the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    /// Caption anchored at the top edge.
    Top,
    /// Caption anchored at the bottom edge.
    Bottom,
}

/// Font (and color scheme) the captions are rendered with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontChoice {
    /// White Impact text, the traditional meme look.
    Classic,
    /// Orange bubblegum text.
    Unique,
}

impl FontChoice {
    /// Name of the font resource to load for this choice.
    #[inline]
    pub fn resource_name(&self) -> &'static str {
        match *self {
            FontChoice::Classic => "impact",
            FontChoice::Unique => "bubblegum",
        }
    }

    /// Fill color of the text.
    #[inline]
    pub fn color(&self) -> Color {
        match *self {
            FontChoice::Classic => CLASSIC_COLOR,
            FontChoice::Unique => UNIQUE_COLOR,
        }
    }

    /// Color of the text outline.
    #[inline]
    pub fn outline_color(&self) -> Color {
        DEFAULT_OUTLINE_COLOR
    }
}

impl Default for FontChoice {
    fn default() -> Self {
        DEFAULT_FONT
    }
}

/// Which of the caption slots are filled in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextPosition {
    Top,
    Bottom,
    Both,
}

impl TextPosition {
    /// Whether captions in given slot should be rendered.
    #[inline]
    pub fn includes(&self, slot: Slot) -> bool {
        match (*self, slot) {
            (TextPosition::Both, _) => true,
            (TextPosition::Top, Slot::Top) => true,
            (TextPosition::Bottom, Slot::Bottom) => true,
            _ => false,
        }
    }
}


/// Describes a single piece of text rendered on the image.
#[derive(Clone, PartialEq, Eq)]
pub struct Caption {
    /// Text to render.
    ///
    /// It's uppercased before rendering.
    /// Newline characters (`"\n"`) force a line break.
    pub text: String,
    /// Where the caption goes.
    pub slot: Slot,
    /// Font to render the caption with.
    pub font: FontChoice,
}

impl Caption {
    /// Create a Caption with a text at the particular slot, using the default font.
    #[inline]
    pub fn text_at<S: Into<String>>(slot: Slot, s: S) -> Self {
        Caption{text: s.into(), slot, font: FontChoice::default()}
    }

    /// Whether the caption has nothing to draw.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// The text as it will be rendered.
    #[inline]
    pub fn normalized_text(&self) -> String {
        self.text.to_uppercase()
    }
}

impl fmt::Debug for Caption {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{slot:?}{{{font:?}}}({text:?})",
            slot = self.slot, font = self.font, text = self.text)
    }
}
