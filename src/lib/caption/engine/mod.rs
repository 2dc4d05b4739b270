//! Module which defines the captioning engine.

mod builder;
mod config;

pub use self::builder::{Builder, Error as BuildError};
pub use self::config::{Config, Error as ConfigError, OutputFormat};


use std::path::Path;
use std::sync::Arc;

use image::DynamicImage;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::model::CaptionRequest;
use crate::resources::{CachingLoader, Font, FontLoader, ImageLoader, Loader};
use crate::util::cache::ThreadSafeCache;
use super::error::CaptionError;
use super::output::CaptionOutput;
use super::task::CaptionTask;


const DEFAULT_IMAGE_CAPACITY: usize = 64;
const DEFAULT_FONT_CAPACITY: usize = 8;


/// Image captioning engine.
///
/// The engine is thread-safe (`Sync`) since normally you'd want the captioning
/// to be performed in a background thread.
///
/// *Note*: `Engine` implements `Clone`
/// by merely cloning a shared reference to the underlying object.
#[derive(Debug)]
pub struct Engine<Il = ImageLoader, Fl = FontLoader>
    where Il: Loader<Item=DynamicImage>, Fl: Loader<Item=Font>
{
    inner: Arc<Inner<Il, Fl>>,
}

impl<Il, Fl> Clone for Engine<Il, Fl>
    where Il: Loader<Item=DynamicImage>, Fl: Loader<Item=Font>
{
    fn clone(&self) -> Self {
        Engine{inner: self.inner.clone()}
    }
}

/// Shared state of the engine that caption tasks have access to.
#[derive(Debug)]
pub(super) struct Inner<Il, Fl>
    where Il: Loader<Item=DynamicImage>, Fl: Loader<Item=Font>
{
    pub(super) config: RwLock<Config>,
    pub image_loader: CachingLoader<Il>,
    pub font_loader: CachingLoader<Fl>,
}

impl<Il, Fl> Inner<Il, Fl>
    where Il: Loader<Item=DynamicImage>, Fl: Loader<Item=Font>
{
    #[inline]
    pub fn new(config: Config,
               image_loader: CachingLoader<Il>,
               font_loader: CachingLoader<Fl>) -> Self {
        let config = RwLock::new(config);
        Inner{config, image_loader, font_loader}
    }
}

impl<Il, Fl> From<Inner<Il, Fl>> for Engine<Il, Fl>
    where Il: Loader<Item=DynamicImage>, Fl: Loader<Item=Font>
{
    fn from(inner: Inner<Il, Fl>) -> Self {
        Engine{inner: Arc::new(inner)}
    }
}

// Constructors.
impl Engine<ImageLoader, FontLoader> {
    /// Create an Engine which loads preset images & fonts from given directory paths.
    ///
    /// When loaded, both resources will be cached in memory (LRU cache).
    ///
    /// For other ways of creating `Engine`, see `Engine::builder`.
    #[inline]
    pub fn new<Di, Df>(image_directory: Di, font_directory: Df) -> Self
        where Di: AsRef<Path>, Df: AsRef<Path>
    {
        Engine::with_loaders(ImageLoader::new(image_directory), FontLoader::new(font_directory))
    }
}
impl<Il, Fl> Engine<Il, Fl>
    where Il: Loader<Item=DynamicImage>, Fl: Loader<Item=Font>
{
    /// Start configuring an `Engine`.
    #[inline]
    pub fn builder() -> Builder<Il, Fl> {
        Builder::new()
    }

    /// Create an Engine that uses given loaders for preset images & fonts.
    ///
    /// When loaded, both resources will be cached in memory (LRU cache).
    #[inline]
    pub fn with_loaders(image_loader: Il, font_loader: Fl) -> Self {
        Engine::from(Inner::new(Config::default(),
            CachingLoader::new(image_loader, DEFAULT_IMAGE_CAPACITY),
            CachingLoader::new(font_loader, DEFAULT_FONT_CAPACITY)))
    }

    /// Create an Engine that uses given image & font loaders directly.
    ///
    /// Any caching scheme, if necessary, should be implemented by loaders themselves.
    #[inline]
    pub fn with_raw_loaders(image_loader: Il, font_loader: Fl) -> Self {
        Engine::from(Inner::new(Config::default(),
            CachingLoader::phony(image_loader),
            CachingLoader::phony(font_loader)))
    }
}


// Captioning.
impl<Il, Fl> Engine<Il, Fl>
    where Il: Loader<Item=DynamicImage>, Fl: Loader<Item=Font>
{
    /// Render the captions of given request onto its image.
    ///
    /// Captioning is CPU-intensive (resizing especially),
    /// so it is recommended to execute it in a separate thread.
    pub fn caption(&self, request: CaptionRequest) -> Result<CaptionOutput, CaptionError> {
        let config = self.inner.config.read().clone();
        config.validate()
            .map_err(|e| CaptionError::Render(format!("invalid configuration: {}", e)))?;
        CaptionTask::new(request, config, self.inner.clone()).perform()
    }
}

// Managing resources.
impl<Il, Fl> Engine<Il, Fl>
    where Il: Loader<Item=DynamicImage>, Fl: Loader<Item=Font>
{
    /// Preemptively load a preset image into engine's cache.
    pub fn preload_image(&self, name: &str) -> Result<(), Il::Err> {
        if !self.inner.image_loader.phony {
            self.inner.image_loader.load(name)?;
        }
        Ok(())
    }

    /// Preemptively load a font into engine's cache.
    pub fn preload_font(&self, name: &str) -> Result<(), Fl::Err> {
        if !self.inner.font_loader.phony {
            self.inner.font_loader.load(name)?;
        }
        Ok(())
    }

    /// Return a reference to the internal preset image cache, if any.
    /// This can be used to examine cache statistics (hits & misses).
    pub fn image_cache(&self) -> Option<&ThreadSafeCache<String, Il::Item>> {
        if self.inner.image_loader.phony {
            None
        } else {
            Some(self.inner.image_loader.cache())
        }
    }

    /// Return a reference to the internal font cache, if any.
    /// This can be used to examine cache statistics (hits & misses).
    pub fn font_cache(&self) -> Option<&ThreadSafeCache<String, Fl::Item>> {
        if self.inner.font_loader.phony {
            None
        } else {
            Some(self.inner.font_loader.cache())
        }
    }
}

// Configuration.
impl<Il, Fl> Engine<Il, Fl>
    where Il: Loader<Item=DynamicImage>, Fl: Loader<Item=Font>
{
    /// Read the `Engine`'s configuration.
    #[inline]
    pub fn config(&self) -> RwLockReadGuard<Config> {
        self.inner.config.read()
    }

    /// Modify the `Engine`'s configuration.
    ///
    /// Changes will affect captioning tasks started afterwards.
    #[inline]
    pub fn config_mut(&self) -> RwLockWriteGuard<Config> {
        self.inner.config.write()
    }
}
