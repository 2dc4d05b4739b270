//! Module implementing a thread-safe LRU cache.

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use lru_cache::LruCache;
use parking_lot::Mutex;


/// A thread-safe cache of keys & cached values.
/// Actual values stored in the cache are `Arc<V>'`s.
///
/// Values are never mutated once inserted, so handing out clones
/// of the `Arc` is safe under concurrent lookups.
///
/// This is a wrapper around `LruCache` that also counts cache hits & misses.
pub struct ThreadSafeCache<K, V, S = RandomState>
    where K: Eq + Hash, S: BuildHasher
{
    inner: Mutex<LruCache<K, Arc<V>, S>>,
    // Cache statistics.
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl<K: Eq + Hash, V> ThreadSafeCache<K, V> {
    /// Create the cache with given capacity.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self::with_hasher(capacity, RandomState::new())
    }
}

impl<K, V, S> ThreadSafeCache<K, V, S>
    where K: Eq + Hash, S: BuildHasher
{
    /// Create the cache with custom hasher and given capacity.
    pub fn with_hasher(capacity: usize, hasher: S) -> Self {
        ThreadSafeCache{
            inner: Mutex::new(LruCache::with_hasher(capacity, hasher)),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }
}

// LruCache interface wrappers.
impl<K: Eq + Hash, V> ThreadSafeCache<K, V> {
    /// Check if the cache contains given key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
        where K: Borrow<Q>, Q: ?Sized + Eq + Hash
    {
        self.inner.lock().contains_key(key)
    }

    /// Get the element corresponding to given key if it's present in the cache.
    pub fn get<Q>(&self, key: &Q) -> Option<Arc<V>>
        where K: Borrow<Q>, Q: ?Sized + Eq + Hash
    {
        match self.inner.lock().get_mut(key) {
            Some(v) => { self.hit(); Some(v.clone()) }
            None => { self.miss(); None }
        }
    }

    /// Put an item into cache under given key.
    ///
    /// Returns the (`Arc`'d) value that ends up in the cache.
    /// If another thread has managed to cache the key in the meantime,
    /// that earlier value is kept and returned instead of `v`.
    pub fn put(&self, k: K, v: V) -> Arc<V> {
        let mut inner = self.inner.lock();
        if let Some(existing) = inner.get_mut(&k) {
            return existing.clone();
        }
        let value = Arc::new(v);
        inner.insert(k, value.clone());
        value
    }

    /// Cache capacity.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Current size of the cache.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

// Incrementing the statistics' counters.
impl<K: Eq + Hash, V> ThreadSafeCache<K, V> {
    /// Increment the number of cache hits. Returns the new total.
    fn hit(&self) -> usize {
        let inc = 1;
        self.hits.fetch_add(inc, Ordering::Relaxed) + inc
    }

    /// Increment the number of cache misses. Returns the new total.
    fn miss(&self) -> usize {
        let inc = 1;
        self.misses.fetch_add(inc, Ordering::Relaxed) + inc
    }
}

// Getting counter values.
impl<K: Eq + Hash, V> ThreadSafeCache<K, V> {
    /// Returns the number of cache hits.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    /// Returns the number of cache misses.
    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }
}

impl<K: Eq + Hash, V> fmt::Debug for ThreadSafeCache<K, V> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let mut ds = fmt.debug_struct("ThreadSafeCache");
        if let Some(inner) = self.inner.try_lock() {
            ds.field("capacity", &inner.capacity());
            ds.field("len", &inner.len());
        }
        ds.field("hits", &self.hits());
        ds.field("misses", &self.misses());
        ds.finish()
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use spectral::prelude::*;
    use super::ThreadSafeCache;

    #[test]
    fn hits_and_misses() {
        let cache = ThreadSafeCache::new(4);
        assert_that!(cache.get("foo")).is_none();
        cache.put("foo".to_owned(), 42);
        assert_that!(cache.get("foo").map(|v| *v)).is_some().is_equal_to(42);
        assert_eq!(1, cache.hits());
        assert_eq!(1, cache.misses());
    }

    #[test]
    fn put_keeps_first_value() {
        let cache = ThreadSafeCache::new(4);
        let first = cache.put("key".to_owned(), 1);
        let second = cache.put("key".to_owned(), 2);
        assert_eq!(1, *second);
        assert_that!(Arc::ptr_eq(&first, &second)).is_true();
    }

    #[test]
    fn evicts_least_recently_used() {
        let cache = ThreadSafeCache::new(2);
        cache.put(1, "one");
        cache.put(2, "two");
        cache.get(&1);
        cache.put(3, "three");
        assert_that!(cache.contains_key(&1)).is_true();
        assert_that!(cache.contains_key(&2)).is_false();
        assert_eq!(2, cache.len());
    }

    #[test]
    fn concurrent_lookups() {
        let cache = Arc::new(ThreadSafeCache::new(8));
        cache.put("shared".to_owned(), vec![1, 2, 3]);
        let handles: Vec<_> = (0..4).map(|_| {
            let cache = cache.clone();
            thread::spawn(move || cache.get("shared").map(|v| v.len()))
        }).collect();
        for handle in handles {
            assert_eq!(Some(3), handle.join().unwrap());
        }
        assert_eq!(4, cache.hits());
    }
}
