//! Module implementing the `CaptionRequest` type and its builder.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::constants::{DEFAULT_POSITION, MAX_CAPTION_LENGTH, MAX_TARGET_SIZE};
use super::caption::{Caption, FontChoice, Slot, TextPosition};


/// Where the image to caption comes from.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    /// One of the preset images, by name (without extension).
    Preset(String),
    /// Image file on disk, e.g. a saved upload.
    Path(PathBuf),
    /// Encoded image in memory.
    Bytes(Vec<u8>),
}

impl ImageSource {
    /// Short, human-readable name of the source, for logs and errors.
    pub fn name(&self) -> String {
        match *self {
            ImageSource::Preset(ref name) => name.clone(),
            ImageSource::Path(ref path) => format!("{}", path.display()),
            ImageSource::Bytes(ref bytes) => format!("<{} bytes>", bytes.len()),
        }
    }
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ImageSource::Preset(ref name) => write!(fmt, "ImageSource::Preset({:?})", name),
            ImageSource::Path(ref path) => write!(fmt, "ImageSource::Path({:?})", path),
            ImageSource::Bytes(ref bytes) => write!(fmt, "ImageSource::Bytes(<{} bytes>)", bytes.len()),
        }
    }
}


/// Describes a meme to render. Used as an input structure.
///
/// Use `CaptionRequest::builder` to create it.
#[derive(Clone, PartialEq, Eq)]
pub struct CaptionRequest {
    /// The image to put the captions on.
    pub image: ImageSource,
    /// Text of the top caption.
    pub top_text: Option<String>,
    /// Text of the bottom caption.
    pub bottom_text: Option<String>,
    /// Which of the two texts are actually used.
    pub position: TextPosition,
    /// Font for both captions.
    pub font: FontChoice,
    /// Side of the square the image is resized & cropped to, if any.
    pub target_size: Option<u32>,
}

impl CaptionRequest {
    /// Start building a request for an image from given source.
    #[inline]
    pub fn builder(image: ImageSource) -> Builder {
        Builder::new(image)
    }

    /// Captions to render, in drawing order.
    ///
    /// Slots excluded by `position` or with empty text are left out.
    pub fn captions(&self) -> Vec<Caption> {
        let slots = [(Slot::Top, &self.top_text), (Slot::Bottom, &self.bottom_text)];
        slots.iter()
            .filter(|&&(slot, _)| self.position.includes(slot))
            .filter_map(|&(slot, text)| text.as_ref().map(|t| Caption{
                text: t.clone(),
                slot,
                font: self.font,
            }))
            .filter(|c| !c.is_empty())
            .collect()
    }

    /// Whether the request includes any text.
    #[inline]
    pub fn has_text(&self) -> bool {
        !self.captions().is_empty()
    }
}

impl fmt::Debug for CaptionRequest {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let mut ds = fmt.debug_struct("CaptionRequest");
        ds.field("image", &self.image);

        macro_rules! fmt_opt_field {
            ($name:ident) => (
                if let Some(ref $name) = self.$name {
                    ds.field(stringify!($name), $name);
                }
            );
        }
        fmt_opt_field!(top_text);
        fmt_opt_field!(bottom_text);

        ds.field("position", &self.position);
        ds.field("font", &self.font);
        fmt_opt_field!(target_size);

        ds.finish()
    }
}


/// Builder for `CaptionRequest`.
#[derive(Debug, PartialEq)]
#[must_use = "unused builder which must be used"]
pub struct Builder {
    image: ImageSource,
    top_text: Option<String>,
    bottom_text: Option<String>,
    position: Option<TextPosition>,
    font: Option<FontChoice>,
    target_size: Option<u32>,
}

impl Builder {
    /// Create a new `Builder` for a `CaptionRequest`.
    #[inline]
    pub fn new(image: ImageSource) -> Self {
        Builder{
            image,
            top_text: None,
            bottom_text: None,
            position: None,
            font: None,
            target_size: None,
        }
    }
}

impl Builder {
    /// Set the text of the top caption.
    #[inline]
    pub fn top_text<S: Into<String>>(mut self, text: S) -> Self {
        self.top_text = Some(text.into()); self
    }

    /// Set the text of the bottom caption.
    #[inline]
    pub fn bottom_text<S: Into<String>>(mut self, text: S) -> Self {
        self.bottom_text = Some(text.into()); self
    }

    /// Choose which captions are rendered. Defaults to both.
    #[inline]
    pub fn position(mut self, position: TextPosition) -> Self {
        self.position = Some(position); self
    }

    /// Choose the caption font.
    #[inline]
    pub fn font(mut self, font: FontChoice) -> Self {
        self.font = Some(font); self
    }

    /// Resize & center-crop the image to a square of given side.
    ///
    /// By default, the engine's configured size is used
    /// (which in turn defaults to keeping the original dimensions).
    #[inline]
    pub fn target_size(mut self, size: u32) -> Self {
        self.target_size = Some(size); self
    }
}

impl Builder {
    /// Build the resulting `CaptionRequest`.
    pub fn build(self) -> Result<CaptionRequest, Error> {
        self.validate()?;
        Ok(CaptionRequest{
            image: self.image,
            top_text: self.top_text,
            bottom_text: self.bottom_text,
            position: self.position.unwrap_or(DEFAULT_POSITION),
            font: self.font.unwrap_or_default(),
            target_size: self.target_size,
        })
    }

    #[doc(hidden)]
    fn validate(&self) -> Result<(), Error> {
        if let ImageSource::Preset(ref name) = self.image {
            if name.trim().is_empty() {
                return Err(Error::NoImage);
            }
        }
        for text in self.top_text.iter().chain(self.bottom_text.iter()) {
            let length = text.chars().count();
            if length > MAX_CAPTION_LENGTH {
                return Err(Error::CaptionTooLong(length));
            }
        }
        if let Some(size) = self.target_size {
            if size == 0 || size > MAX_TARGET_SIZE {
                return Err(Error::InvalidTargetSize(size));
            }
        }
        Ok(())
    }
}


/// Error while building a `CaptionRequest`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Empty preset name.
    #[error("no image chosen")]
    NoImage,
    /// Caption text too long.
    #[error("caption too long: {0} > {}", MAX_CAPTION_LENGTH)]
    CaptionTooLong(usize),
    /// Target square size out of range.
    #[error("invalid target size: {0} (must be within 1..={})", MAX_TARGET_SIZE)]
    InvalidTargetSize(u32),
}
