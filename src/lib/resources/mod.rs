//! Module handling the resources used for captioning.

mod filesystem;
mod fonts;


pub use self::filesystem::{BytesLoader, FileLoader};
pub use self::fonts::{BUNDLED_FONT, FontError, FontLoader, Typeface,
                      FILE_EXTENSIONS as FONT_FILE_EXTENSIONS};


use std::fmt;
use std::sync::Arc;

use util::cache::ThreadSafeCache;


/// Loader of resources from some external source.
pub trait Loader {
    /// Type of resources that this loader can load.
    type Item;
    /// Error that may occur while loading the resource.
    type Err;

    /// Load a resource of given name.
    fn load<'n>(&self, name: &'n str) -> Result<Self::Item, Self::Err>;
}


/// A loader that keeps a cache of resources previously loaded.
///
/// Resources are handed out as shared, read-only references.
pub struct CachingLoader<L: Loader> {
    inner: L,
    cache: ThreadSafeCache<String, L::Item>,
}

impl<L: Loader> CachingLoader<L> {
    #[inline]
    pub fn new(inner: L, capacity: usize) -> Self {
        CachingLoader{inner, cache: ThreadSafeCache::new(capacity)}
    }

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
    fn load<'n>(&self, name: &'n str) -> Result<Self::Item, Self::Err> {
        if let Some(obj) = self.cache.get(name) {
            trace!("Resource `{}` found in cache", name);
            return Ok(obj);
        }
        let obj = self.inner.load(name)?;
        Ok(self.cache.put(name.to_owned(), obj))
    }
}

impl<L: Loader> fmt::Debug for CachingLoader<L> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("CachingLoader")
            .field("inner", &"...")
            .field("cache", &self.cache)
            .finish()
    }
}
