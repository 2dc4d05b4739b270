//! Module handling the images that captions are put on.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use image::{self, DynamicImage, ImageFormat};
use thiserror::Error;

use super::Loader;
use super::filesystem::PathLoader;


lazy_static! {
    /// Map of image file extensions to supported image formats.
    pub static ref IMAGE_FORMAT_EXTENSIONS: HashMap<&'static str, ImageFormat> = hashmap!{
        "jpeg" => ImageFormat::Jpeg,
        "jpg" => ImageFormat::Jpeg,
        "png" => ImageFormat::Png,
    };
}


/// Whether the file at given path looks like an image we can caption.
///
/// This only checks the extension.
pub fn is_supported_image<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().extension().and_then(|e| e.to_str())
        .map(|ext| IMAGE_FORMAT_EXTENSIONS.contains_key(ext.trim().to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Open an image file, e.g. an uploaded one.
pub fn load_image_file<P: AsRef<Path>>(path: P) -> Result<DynamicImage, SourceError> {
    let path = path.as_ref();
    if !is_supported_image(path) {
        let ext = path.extension().map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_else(String::new);
        return Err(SourceError::Unsupported(ext));
    }
    trace!("Opening image {}", path.display());
    if !path.is_file() {
        return Err(SourceError::File(io::Error::new(io::ErrorKind::NotFound,
            format!("no image file at {}", path.display()))));
    }
    let img = image::open(path)?;
    Ok(img)
}

/// Decode an image from its encoded bytes.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, SourceError> {
    trace!("Decoding image from {} byte(s)", bytes.len());
    let img = image::load_from_memory(bytes)?;
    Ok(img)
}


/// Error while obtaining the source image.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Image file could not be found or read.
    #[error("cannot read image file: {0}")]
    File(#[from] io::Error),
    /// Image data couldn't be decoded.
    #[error("cannot decode image: {0}")]
    Decode(#[from] image::ImageError),
    /// File extension doesn't denote a supported format.
    #[error("unsupported image format `{0}`")]
    Unsupported(String),
}


/// Loader for the preset images, stored as files in a directory.
#[derive(Debug)]
pub struct ImageLoader {
    inner: PathLoader,
}

impl ImageLoader {
    pub fn new<D: AsRef<Path>>(directory: D) -> Self {
        let extensions = IMAGE_FORMAT_EXTENSIONS.keys();
        ImageLoader{
            inner: PathLoader::for_extensions(directory, extensions),
        }
    }
}

impl Loader for ImageLoader {
    type Item = DynamicImage;
    type Err = SourceError;

    fn load(&self, name: &str) -> Result<DynamicImage, Self::Err> {
        let path = self.inner.load(name)?;
        let img = load_image_file(&path).map_err(|e| {
            error!("Failed to open preset image {}: {}", path.display(), e); e
        })?;
        debug!("Preset image `{}` loaded from {}", name, path.display());
        Ok(img)
    }
}
