use crate::ports::outbound::DescriptorRepository;
use crate::release_report::domain::Coordinates;
use crate::shared::Result;
use dashmap::DashMap;
use std::sync::Arc;

/// CachingRepository wraps a DescriptorRepository and adds in-memory caching.
///
/// Only successful fetches are cached; a failed lookup is retried the next
/// time the same coordinates are requested.
pub struct CachingRepository<R: DescriptorRepository> {
    inner: R,
    cache: Arc<DashMap<String, String>>,
}

impl<R: DescriptorRepository> CachingRepository<R> {
    /// Creates a new caching repository wrapping the given inner repository
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Returns the current cache size (for testing/monitoring)
    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl<R: DescriptorRepository> DescriptorRepository for CachingRepository<R> {
    fn fetch_descriptor(&self, coordinates: &Coordinates) -> Result<String> {
        let key = coordinates.to_string();

        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.clone());
        }

        let content = self.inner.fetch_descriptor(coordinates)?;
        self.cache.insert(key, content.clone());

        Ok(content)
    }

    fn location(&self) -> String {
        self.inner.location()
    }
}
