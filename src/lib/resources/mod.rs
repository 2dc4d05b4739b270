//! Module handling the resources used for captioning.

mod filesystem;
mod fonts;
mod images;


pub use self::filesystem::{BytesLoader, FileLoader, PathLoader};
pub use self::fonts::{Font, FontError, FontLoader, FILE_EXTENSIONS as FONT_FILE_EXTENSIONS};
pub use self::images::{decode_image, is_supported_image, load_image_file,
                       ImageLoader, SourceError, IMAGE_FORMAT_EXTENSIONS};


use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::util::cache::ThreadSafeCache;


/// Loader of resources from some external source.
pub trait Loader {
    /// Type of resources that this loader can load.
    type Item;
    /// Error that may occur while loading the resource.
    type Err: Error + Send + Sync + 'static;

    /// Load a resource of given name.
    fn load(&self, name: &str) -> Result<Self::Item, Self::Err>;
}


/// A loader that keeps a cache of resources previously loaded.
pub struct CachingLoader<L: Loader> {
    inner: L,
    cache: ThreadSafeCache<String, L::Item>,
    pub(crate) phony: bool,
}

impl<L: Loader> CachingLoader<L> {
    #[inline]
    pub fn new(inner: L, capacity: usize) -> Self {
        CachingLoader{
            inner,
            cache: ThreadSafeCache::new(capacity),
            phony: false,
        }
    }

    /// Create a phony version of CachingLoader that doesn't actually cache anything.
    ///
    /// This is used to transparently wrap a Loader<Item=T> into Loader<Item=Arc<T>>,
    /// which is necessary because Rust cannot really abstract between the two.
    #[inline]
    pub(crate) fn phony(inner: L) -> Self {
        CachingLoader{
            inner,
            cache: ThreadSafeCache::new(1),
            phony: true,
        }
    }
}

impl<L: Loader> CachingLoader<L> {
    #[inline]
    pub fn cache(&self) -> &ThreadSafeCache<String, L::Item> {
        &self.cache
    }
}

impl<L: Loader> Loader for CachingLoader<L> {
    type Item = Arc<L::Item>;
    type Err = L::Err;

    /// Load the object from cache or fall back on the original Loader.
    /// Cache the objects loaded this way.
    fn load(&self, name: &str) -> Result<Self::Item, Self::Err> {
        if self.phony {
            let obj = self.inner.load(name)?;
            Ok(Arc::new(obj))
        } else {
            if let Some(obj) = self.cache.get(name) {
                trace!("Cache hit for resource `{}`", name);
                return Ok(obj);
            }
            let obj = self.inner.load(name)?;
            let cached_obj = self.cache.put(name.to_owned(), obj);
            Ok(cached_obj)
        }
    }
}

impl<L: Loader> fmt::Debug for CachingLoader<L> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("CachingLoader")
            .field("inner", &"...")
            .field("cache", &self.cache)
            .field("phony", &self.phony)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use spectral::prelude::*;
    use super::{CachingLoader, Loader};

    /// Loader that counts how many times it was asked for something.
    #[derive(Default)]
    struct CountingLoader {
        calls: AtomicUsize,
    }
    impl Loader for CountingLoader {
        type Item = String;
        type Err = io::Error;

        fn load(&self, name: &str) -> Result<String, io::Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if name.is_empty() {
                return Err(io::Error::new(io::ErrorKind::NotFound, "empty name"));
            }
            Ok(name.to_uppercase())
        }
    }

    #[test]
    fn caches_loaded_resources() {
        let loader = CachingLoader::new(CountingLoader::default(), 4);
        assert_eq!("FOO", *loader.load("foo").unwrap());
        assert_eq!("FOO", *loader.load("foo").unwrap());
        assert_eq!(1, loader.inner.calls.load(Ordering::SeqCst));
        assert_eq!(1, loader.cache().hits());
    }

    #[test]
    fn phony_never_caches() {
        let loader = CachingLoader::phony(CountingLoader::default());
        loader.load("foo").unwrap();
        loader.load("foo").unwrap();
        assert_eq!(2, loader.inner.calls.load(Ordering::SeqCst));
        assert_that!(loader.cache().is_empty()).is_true();
    }

    #[test]
    fn errors_are_not_cached() {
        let loader = CachingLoader::new(CountingLoader::default(), 4);
        assert_that!(loader.load("")).is_err();
        assert_that!(loader.load("")).is_err();
        assert_eq!(2, loader.inner.calls.load(Ordering::SeqCst));
    }
}
