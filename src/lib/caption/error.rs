//! Captioning error.

use std::error::Error;

use thiserror::Error;


/// Error that may occur during the captioning.
#[derive(Debug, Error)]
pub enum CaptionError {
    /// Source image couldn't be loaded or decoded.
    #[error("cannot load image `{name}`: {source}")]
    ImageLoad {
        name: String,
        source: Box<dyn Error + Send + Sync>,
    },
    /// Font needed by one of the captions couldn't be loaded.
    #[error("cannot load font `{name}`: {source}")]
    FontLoad {
        name: String,
        source: Box<dyn Error + Send + Sync>,
    },
    /// Image couldn't be prepared or drawn on.
    #[error("rendering failed: {0}")]
    Render(String),
    /// Final image couldn't be encoded.
    #[error("failed to encode the final image: {0}")]
    Encode(#[source] image::ImageError),
}

impl CaptionError {
    #[inline]
    pub(crate) fn image_load<N, E>(name: N, error: E) -> Self
        where N: Into<String>, E: Error + Send + Sync + 'static
    {
        CaptionError::ImageLoad{name: name.into(), source: Box::new(error)}
    }

    #[inline]
    pub(crate) fn font_load<N, E>(name: N, error: E) -> Self
        where N: Into<String>, E: Error + Send + Sync + 'static
    {
        CaptionError::FontLoad{name: name.into(), source: Box::new(error)}
    }
}
