//! Data structures for command-line arguments.

use std::path::PathBuf;

use prawn::{CaptionRequest, CaptionRequestError, OutputFormat};
use thiserror::Error;


/// Structure to hold options received from the command line.
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    /// Verbosity of the logging output.
    ///
    /// Corresponds to the number of times the -v flag has been passed.
    /// If -q has been used instead, this will be negative.
    pub verbosity: isize,

    /// What to caption, and how.
    pub request: CaptionRequest,
    /// Format of the resulting image.
    pub output_format: OutputFormat,

    /// Directory with the preset images.
    pub image_directory: PathBuf,
    /// Directory with the caption fonts.
    pub font_directory: PathBuf,

    /// Path to write the captioned image to.
    ///
    /// If absent, it shall be written to standard output.
    pub output_path: Option<PathBuf>,
}

#[allow(dead_code)]
impl Options {
    #[inline]
    pub fn verbose(&self) -> bool { self.verbosity > 0 }
    #[inline]
    pub fn quiet(&self) -> bool { self.verbosity < 0 }
}


/// Error that can occur while parsing of command line arguments.
#[derive(Debug, Error)]
pub enum ArgsError {
    /// General error when parsing the arguments.
    #[error("invalid arguments: {0}")]
    Parse(#[from] clap::Error),
    /// Image file that can't be captioned.
    #[error("unsupported image file `{0}` (expected PNG or JPEG)")]
    Image(PathBuf),
    /// Unrecognized --font value.
    #[error("unknown font `{0}`")]
    Font(String),
    /// Unrecognized --position value.
    #[error("invalid text position `{0}`")]
    Position(String),
    /// Malformed --size value.
    #[error("invalid image size `{0}`")]
    Size(String),
    /// Invalid combination of captioning parameters.
    #[error("invalid caption request: {0}")]
    Request(#[from] CaptionRequestError),
}
