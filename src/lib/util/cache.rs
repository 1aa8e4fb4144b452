//! Module implementing a thread-safe LRU cache.

use std::borrow::Borrow;
use std::hash::Hash;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use antidote::Mutex;
use lru_cache::LruCache;


/// A thread-safe cache of keys & cached values.
/// Actual values stored in the cache are `Arc<V>`'s.
///
/// This is a wrapper around `LruCache` that also counts cache hits & misses.
pub struct ThreadSafeCache<K: Eq + Hash, V> {
    inner: Mutex<LruCache<K, Arc<V>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl<K: Eq + Hash, V> ThreadSafeCache<K, V> {
    /// Create the cache with given capacity.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        ThreadSafeCache{
            inner: Mutex::new(LruCache::new(capacity)),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }
}

impl<K: Eq + Hash, V> ThreadSafeCache<K, V> {
    /// Get the element corresponding to given key if it's present in the cache.
    pub fn get<Q>(&self, key: &Q) -> Option<Arc<V>>
        where K: Borrow<Q>, Q: ?Sized + Eq + Hash
    {
        match self.inner.lock().get_mut(key) {
            Some(v) => { self.hits.fetch_add(1, Ordering::Relaxed); Some(v.clone()) }
            None => { self.misses.fetch_add(1, Ordering::Relaxed); None }
        }
    }

    /// Put an item into cache under given key
    /// and return the (`Arc`'d) value that is now stored there.
    pub fn put(&self, k: K, v: V) -> Arc<V> {
        let value = Arc::new(v);
        self.inner.lock().insert(k, value.clone());
        value
    }

    /// Current size of the cache.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

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
        if let Ok(inner) = self.inner.try_lock() {
            ds.field("capacity", &inner.capacity());
            ds.field("len", &inner.len());
        }
        ds.field("hits", &self.hits());
        ds.field("misses", &self.misses());
        ds.finish()
    }
}
