//! Module implementing the builder for `Engine`.

use std::path::Path;

use image::DynamicImage;
use thiserror::Error;

use crate::resources::{CachingLoader, Font, FontLoader, ImageLoader, Loader};
use crate::text::Margins;
use super::config::{Config, Error as ConfigError, OutputFormat};
use super::{Engine, DEFAULT_FONT_CAPACITY, DEFAULT_IMAGE_CAPACITY};


/// Builder for `Engine`.
#[derive(Debug)]
#[must_use = "unused builder which must be used"]
pub struct Builder<Il = ImageLoader, Fl = FontLoader>
    where Il: Loader<Item=DynamicImage>, Fl: Loader<Item=Font>
{
    errors: Vec<Error>,

    image_loader_builder: Option<LoaderBuilder<Il>>,
    font_loader_builder: Option<LoaderBuilder<Fl>>,

    config: Config,
}


/// Temporary configuration for an image or font loader.
/// Used by `Builder`.
#[derive(Debug)]
enum LoaderBuilder<L: Loader> {
    Cached {
        inner: Option<L>,
        cache_size: usize,
    },
    Raw { inner: Option<L> },
}

impl<L: Loader> LoaderBuilder<L> {
    #[inline]
    fn cached(size: usize) -> Self {
        LoaderBuilder::Cached { inner: None, cache_size: size }
    }

    #[inline]
    fn raw() -> Self {
        LoaderBuilder::Raw { inner: None }
    }
}

impl<L: Loader> LoaderBuilder<L> {
    /// Set the loader that the `Cached` loader would wrap.
    /// Returns `false` if `LoaderBuilder` is already configured incompatibly.
    fn set_cached_loader(&mut self, loader: L) -> bool {
        match *self {
            LoaderBuilder::Cached{ref mut inner, ..} => { *inner = Some(loader); true }
            LoaderBuilder::Raw{..} => false,
        }
    }

    /// Set the cache size of `Cached` loader.
    /// Returns `false` if `LoaderBuilder` is already configured incompatibly.
    fn set_cache_size(&mut self, size: usize) -> bool {
        match *self {
            LoaderBuilder::Cached{ref mut cache_size, ..} => { *cache_size = size; true }
            LoaderBuilder::Raw{..} => false,
        }
    }

    /// Set the loader that the `Raw` loader would wrap.
    /// Returns `false` if `LoaderBuilder` is already configured incompatibly.
    fn set_raw_loader(&mut self, loader: L) -> bool {
        match *self {
            LoaderBuilder::Raw{ref mut inner} => { *inner = Some(loader); true }
            LoaderBuilder::Cached{..} => false,
        }
    }

    /// Build the `Loader`.
    fn build(self, resource: &'static str) -> Result<CachingLoader<L>, Error> {
        match self {
            LoaderBuilder::Cached{ inner, cache_size } => inner
                .map(|loader| CachingLoader::new(loader, cache_size))
                .ok_or(Error::NoLoader(resource)),
            // Use the phony version of CachingLoader which doesn't actually cache anything,
            // but provides the same interface yielding Arc<L::Item>.
            LoaderBuilder::Raw{ inner } => inner
                .map(CachingLoader::phony)
                .ok_or(Error::NoLoader(resource)),
        }
    }
}


impl<Il, Fl> Builder<Il, Fl>
    where Il: Loader<Item=DynamicImage>, Fl: Loader<Item=Font>
{
    /// Create a new `Builder`.
    #[inline]
    pub fn new() -> Self {
        Builder::default()
    }
}
impl<Il, Fl> Default for Builder<Il, Fl>
    where Il: Loader<Item=DynamicImage>, Fl: Loader<Item=Font>
{
    fn default() -> Self {
        Builder{
            errors: vec![],
            image_loader_builder: None,
            font_loader_builder: None,
            config: Config::default(),
        }
    }
}

// Setters for the standard loaders.
impl<Fl> Builder<ImageLoader, Fl>
    where Fl: Loader<Item=Font>
{
    /// Set the directory where the preset images will be loaded from.
    #[inline]
    pub fn image_directory<P: AsRef<Path>>(self, directory: P) -> Self {
        self.image_loader(ImageLoader::new(directory))
    }
}
impl<Il> Builder<Il, FontLoader>
    where Il: Loader<Item=DynamicImage>
{
    /// Set the directory where the fonts will be loaded from.
    #[inline]
    pub fn font_directory<P: AsRef<Path>>(self, directory: P) -> Self {
        self.font_loader(FontLoader::new(directory))
    }
}

// Setters for custom loaders.
impl<Il, Fl> Builder<Il, Fl>
    where Il: Loader<Item=DynamicImage>, Fl: Loader<Item=Font>
{
    /// Set a custom loader for preset images.
    ///
    /// Images loaded by it will still be cached in an LRU cache.
    /// See `raw_image_loader` if you want to provide your own caching.
    #[inline]
    pub fn image_loader(mut self, loader: Il) -> Self {
        let ok = self.image_loader_builder
            .get_or_insert_with(|| LoaderBuilder::cached(DEFAULT_IMAGE_CAPACITY))
            .set_cached_loader(loader);
        if ok { self } else { self.err(Error::LoaderBuilderConflict("image")) }
    }

    /// Change the size of the preset image cache.
    #[inline]
    pub fn image_cache_size(mut self, size: usize) -> Self {
        let ok = self.image_loader_builder
            .get_or_insert_with(|| LoaderBuilder::cached(DEFAULT_IMAGE_CAPACITY))
            .set_cache_size(size);
        if ok { self } else { self.err(Error::LoaderBuilderConflict("image")) }
    }

    /// Set a custom loader for fonts.
    ///
    /// Fonts loaded by it will still be cached in an LRU cache.
    /// See `raw_font_loader` if you want to provide your own caching.
    #[inline]
    pub fn font_loader(mut self, loader: Fl) -> Self {
        let ok = self.font_loader_builder
            .get_or_insert_with(|| LoaderBuilder::cached(DEFAULT_FONT_CAPACITY))
            .set_cached_loader(loader);
        if ok { self } else { self.err(Error::LoaderBuilderConflict("font")) }
    }

    /// Change the size of the font cache.
    #[inline]
    pub fn font_cache_size(mut self, size: usize) -> Self {
        let ok = self.font_loader_builder
            .get_or_insert_with(|| LoaderBuilder::cached(DEFAULT_FONT_CAPACITY))
            .set_cache_size(size);
        if ok { self } else { self.err(Error::LoaderBuilderConflict("font")) }
    }

    /// Set a custom "raw" loader for preset images.
    ///
    /// Images loaded this way will not be cached (unless the loader itself
    /// implements some kind of caching).
    #[inline]
    pub fn raw_image_loader(mut self, loader: Il) -> Self {
        let ok = self.image_loader_builder
            .get_or_insert_with(LoaderBuilder::raw)
            .set_raw_loader(loader);
        if ok { self } else { self.err(Error::LoaderBuilderConflict("image")) }
    }

    /// Set a custom "raw" loader for fonts.
    ///
    /// Fonts loaded this way will not be cached (unless the loader itself
    /// implements some kind of caching).
    #[inline]
    pub fn raw_font_loader(mut self, loader: Fl) -> Self {
        let ok = self.font_loader_builder
            .get_or_insert_with(LoaderBuilder::raw)
            .set_raw_loader(loader);
        if ok { self } else { self.err(Error::LoaderBuilderConflict("font")) }
    }
}

// Setters for configuration values.
impl<Il, Fl> Builder<Il, Fl>
    where Il: Loader<Item=DynamicImage>, Fl: Loader<Item=Font>
{
    /// Replace the whole engine configuration.
    #[inline]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config; self
    }

    /// Set the format of images generated by the `Engine`.
    #[inline]
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format; self
    }

    /// Set the quality percentage of JPEG images generated by the `Engine`.
    #[inline]
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.config.jpeg_quality = quality; self
    }

    /// Resize & crop images to squares of given side unless requests say otherwise.
    #[inline]
    pub fn target_size(mut self, size: u32) -> Self {
        self.config.default_target_size = Some(size); self
    }

    /// Set the range of font sizes that captions are fitted within.
    #[inline]
    pub fn font_sizes(mut self, initial: u32, min: u32) -> Self {
        self.config.initial_font_size = initial;
        self.config.min_font_size = min;
        self
    }

    #[inline]
    pub fn font_size_step(mut self, step: u32) -> Self {
        self.config.font_size_step = step; self
    }

    /// Set the fraction of image width that caption lines may take.
    #[inline]
    pub fn max_width_ratio(mut self, ratio: f32) -> Self {
        self.config.max_width_ratio = ratio; self
    }

    #[inline]
    pub fn margins(mut self, margins: Margins) -> Self {
        self.config.margins = margins; self
    }

    #[inline]
    pub fn outline_width(mut self, width: u32) -> Self {
        self.config.outline_width = width; self
    }
}

// Validation & building.
impl<Il, Fl> Builder<Il, Fl>
    where Il: Loader<Item=DynamicImage>, Fl: Loader<Item=Font>
{
    /// Build the `Engine`.
    pub fn build(self) -> Result<Engine<Il, Fl>, Error> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }
        self.config.validate()?;

        let image_loader = self.image_loader_builder
            .ok_or(Error::NoLoader("image"))?
            .build("image")?;
        let font_loader = self.font_loader_builder
            .ok_or(Error::NoLoader("font"))?
            .build("font")?;
        Ok(Engine::from(super::Inner::new(self.config, image_loader, font_loader)))
    }

    #[doc(hidden)]
    fn err(mut self, error: Error) -> Self {
        self.errors.push(error); self
    }
}


/// Error that resulted from misconfiguration of the `Engine` via its `Builder`.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// No loader set up for given kind of resource.
    #[error("no {0} loader configured")]
    NoLoader(&'static str),

    /// Image or font loader configuration setup error.
    #[error("invalid combination of configuration parameters for setting up {0} loader")]
    LoaderBuilderConflict(&'static str),

    /// Invalid configuration value.
    #[error("invalid engine configuration: {0}")]
    Config(#[from] ConfigError),
}


#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use crate::resources::{FontLoader, ImageLoader};
    use crate::testing::font_directory;
    use super::super::config::{Error as ConfigError, OutputFormat};
    use super::{Builder, Error};

    #[test]
    fn standard_loaders() {
        let engine = Builder::<ImageLoader, FontLoader>::new()
            .image_directory(font_directory())
            .font_directory(font_directory())
            .image_cache_size(2)
            .output_format(OutputFormat::Png)
            .build().unwrap();
        assert_eq!(OutputFormat::Png, engine.config().output_format);
        assert_eq!(2, engine.image_cache().map(|c| c.capacity()).unwrap_or(0));
    }

    #[test]
    fn missing_loader() {
        let result = Builder::<ImageLoader, FontLoader>::new()
            .font_directory(font_directory())
            .build();
        assert_that!(result.map(|_| ())).is_err_containing(Error::NoLoader("image"));
    }

    #[test]
    fn raw_and_cached_conflict() {
        let result = Builder::<ImageLoader, FontLoader>::new()
            .raw_image_loader(ImageLoader::new(font_directory()))
            .image_cache_size(16)
            .font_directory(font_directory())
            .build();
        assert_that!(result.map(|_| ())).is_err_containing(Error::LoaderBuilderConflict("image"));
    }

    #[test]
    fn raw_loader_has_no_cache() {
        let engine = Builder::<ImageLoader, FontLoader>::new()
            .image_directory(font_directory())
            .raw_font_loader(FontLoader::new(font_directory()))
            .build().unwrap();
        assert_that!(engine.font_cache().is_none()).is_true();
        assert_that!(engine.image_cache().is_some()).is_true();
    }

    #[test]
    fn invalid_config() {
        let result = Builder::<ImageLoader, FontLoader>::new()
            .image_directory(font_directory())
            .font_directory(font_directory())
            .jpeg_quality(0)
            .build();
        assert_that!(result.map(|_| ()))
            .is_err_containing(Error::Config(ConfigError::JpegQuality(0)));
    }
}
