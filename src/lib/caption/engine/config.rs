//! Module with captioning engine configuration.

use std::fmt;

use thiserror::Error;

use crate::text::Margins;


/// Format of the images produced by the `Engine`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    /// Typical file extension for this format.
    #[inline]
    pub fn extension(&self) -> &'static str {
        match *self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Jpeg
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", match *self {
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Png => "PNG",
        })
    }
}


/// Structure holding configuration for the `Engine`.
///
/// This is shared with caption tasks,
/// which take a snapshot of it when they start.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Format of the generated images.
    pub output_format: OutputFormat,
    /// Quality of the generated JPEG images (in %).
    pub jpeg_quality: u8,
    /// Side of the square that images are resized & cropped to,
    /// unless a request says otherwise.
    pub default_target_size: Option<u32>,
    /// Font size that caption fitting starts at.
    pub initial_font_size: u32,
    /// Font size that caption fitting never goes below.
    pub min_font_size: u32,
    /// How much the font size decreases in every fitting step.
    pub font_size_step: u32,
    /// Fraction of the image width that a line of text may occupy.
    pub max_width_ratio: f32,
    pub margins: Margins,
    /// Offset of the outline stamps around the text, in pixels.
    pub outline_width: u32,
}

impl Default for Config {
    /// Initialize Config with default values.
    fn default() -> Self {
        Config {
            output_format: OutputFormat::default(),
            jpeg_quality: 85,
            default_target_size: None,
            initial_font_size: 150,
            min_font_size: 10,
            font_size_step: 1,
            max_width_ratio: 0.95,
            margins: Margins::default(),
            outline_width: 5,
        }
    }
}

impl Config {
    /// Check whether the configuration values make sense.
    pub fn validate(&self) -> Result<(), Error> {
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(Error::JpegQuality(self.jpeg_quality));
        }
        if self.min_font_size == 0 || self.initial_font_size < self.min_font_size {
            return Err(Error::FontSizes{
                initial: self.initial_font_size, min: self.min_font_size});
        }
        if self.font_size_step == 0 {
            return Err(Error::FontSizeStep);
        }
        if !(self.max_width_ratio > 0.0 && self.max_width_ratio <= 1.0) {
            return Err(Error::MaxWidthRatio(self.max_width_ratio));
        }
        if let Some(0) = self.default_target_size {
            return Err(Error::TargetSize);
        }
        Ok(())
    }

    /// Maximum width of a line of text on an image of given width.
    #[inline]
    pub fn max_text_width(&self, image_width: u32) -> u32 {
        (image_width as f32 * self.max_width_ratio).floor() as u32
    }
}


/// Invalid `Config` value.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    #[error("JPEG quality must be within 1..=100 (got {0})")]
    JpegQuality(u8),
    #[error("invalid font sizes: initial {initial}, minimum {min}")]
    FontSizes { initial: u32, min: u32 },
    #[error("font size step must be positive")]
    FontSizeStep,
    #[error("max. width ratio must be within (0, 1] (got {0})")]
    MaxWidthRatio(f32),
    #[error("default target size must be positive")]
    TargetSize,
}
