//! Module for loading fonts used in captions.

use std::fmt;
use std::io;
use std::ops::Deref;
use std::path::Path;

use thiserror::Error;

use super::Loader;
use super::filesystem::{BytesLoader, FileLoader};


/// Extensions of font files the `FontLoader` recognizes.
pub const FILE_EXTENSIONS: &[&str] = &["ttf", "otf"];


/// Font that can be used to caption images.
///
/// Fonts are scalable, so a single loaded `Font` serves every text size.
pub struct Font {
    name: String,
    inner: rusttype::Font<'static>,
}

impl Font {
    /// Parse a font from the content of a font file.
    pub fn from_bytes<N: Into<String>>(name: N, bytes: Vec<u8>) -> Result<Self, FontError> {
        let name = name.into();
        let inner = rusttype::Font::try_from_vec(bytes)
            .ok_or_else(|| FontError::Invalid(name.clone()))?;
        if inner.glyph_count() == 0 {
            error!("Font `{}` contains no glyphs", name);
            return Err(FontError::Invalid(name));
        }
        Ok(Font{name, inner})
    }

    /// Name of the font resource.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Deref for Font {
    type Target = rusttype::Font<'static>;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Font({:?})", self.name)
    }
}


/// Error while loading a font.
#[derive(Debug, Error)]
pub enum FontError {
    /// Font file could not be found or read.
    #[error("cannot read font file: {0}")]
    File(#[from] io::Error),
    /// Font file isn't a usable TrueType/OpenType font.
    #[error("`{0}` is not a valid font")]
    Invalid(String),
}


/// Loader for fonts stored as files in a directory.
#[derive(Debug)]
pub struct FontLoader {
    inner: BytesLoader,
}

impl FontLoader {
    pub fn new<D: AsRef<Path>>(directory: D) -> Self {
        FontLoader{
            inner: BytesLoader::new(
                FileLoader::for_extensions(directory, FILE_EXTENSIONS))
        }
    }
}

impl Loader for FontLoader {
    type Item = Font;
    type Err = FontError;

    fn load(&self, name: &str) -> Result<Font, Self::Err> {
        let bytes = self.inner.load(name).map_err(|e| {
            error!("Failed to read font file for `{}`: {}", name, e); e
        })?;
        let font = Font::from_bytes(name, bytes)?;
        debug!("Font `{}` loaded successfully", name);
        Ok(font)
    }
}


#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use crate::resources::Loader;
    use crate::testing::font_directory;
    use super::{Font, FontError, FontLoader};

    #[test]
    fn load_font() {
        let font = FontLoader::new(font_directory()).load("impact").unwrap();
        assert_eq!("impact", font.name());
        assert_that!(font.glyph_count()).is_greater_than(0);
    }

    #[test]
    fn missing_font() {
        let result = FontLoader::new(font_directory()).load("comicsans");
        match result {
            Err(FontError::File(_)) => {}
            r => panic!("expected FontError::File, got {:?}", r),
        }
    }

    #[test]
    fn corrupt_font() {
        let result = Font::from_bytes("garbage", b"definitely not a font".to_vec());
        match result {
            Err(FontError::Invalid(ref name)) => assert_eq!("garbage", name),
            r => panic!("expected FontError::Invalid, got {:?}", r),
        }
    }
}
