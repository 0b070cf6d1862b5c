//! Source reference to image key cache.

use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;

/// Maps a source reference (path or URL) to the image key it uploaded as.
///
/// An empty image key is never a valid entry.
pub trait ImageKeyCache: Send + Sync {
    /// Returns the cached key, purging the entry if it holds an empty key.
    fn get(&self, source: &str) -> Option<String>;

    /// Stores the key; empty keys are ignored.
    fn insert(&self, source: &str, image_key: &str);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fixed-capacity least-recently-used cache shared by all resolver calls.
pub struct LruImageKeyCache {
    cache: Mutex<LruCache<String, String>>,
}

impl LruImageKeyCache {
    /// Capacity 0 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(cap)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.cache.lock().cap().get()
    }

    /// Writes an entry without the empty-key check.
    #[cfg(test)]
    pub(crate) fn insert_unchecked(&self, source: &str, image_key: &str) {
        self.cache
            .lock()
            .put(source.to_string(), image_key.to_string());
    }
}

impl ImageKeyCache for LruImageKeyCache {
    fn get(&self, source: &str) -> Option<String> {
        let mut cache = self.cache.lock();
        match cache.get(source).cloned() {
            Some(key) if !key.is_empty() => {
                tracing::trace!("Image key cache hit for {}", source);
                Some(key)
            }
            Some(_) => {
                tracing::debug!("Purging empty image key cached for {}", source);
                cache.pop(source);
                None
            }
            None => None,
        }
    }

    fn insert(&self, source: &str, image_key: &str) {
        if image_key.is_empty() {
            return;
        }
        self.cache
            .lock()
            .put(source.to_string(), image_key.to_string());
    }

    fn len(&self) -> usize {
        self.cache.lock().len()
    }
}
