// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Compiled route caching.
//!
//! Compilation is a pure function of the route id, so compiled routes can be
//! shared freely. [`RouteCache`] keeps the most recently used ones in an LRU
//! so that rebuilding a route table (e.g. after a file change in development)
//! does not recompile every route.
//!
//! Two threads compiling the same id at once both do the work and the second
//! insert wins; the results are identical.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;

use crate::error::{Result, RoutingError};
use crate::pattern::{parse_route_id, CompiledRoute};

/// Default number of compiled routes kept by [`RouteCache::default`].
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Thread-safe LRU cache of compiled routes keyed by route id.
///
/// Clones share the same underlying cache.
#[derive(Debug, Clone)]
pub struct RouteCache {
    cache: Arc<Mutex<LruCache<String, Arc<CompiledRoute>>>>,
}

impl RouteCache {
    /// Creates a cache holding up to `capacity` compiled routes.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Returns the compiled route for `id`, compiling it on a miss.
    ///
    /// # Errors
    ///
    /// Propagates compilation errors; these are not cached.
    pub fn compile(&self, id: &str) -> Result<Arc<CompiledRoute>> {
        if let Some(route) = self.get(id)? {
            return Ok(route);
        }

        tracing::debug!("Route cache miss for {}", id);
        let route = Arc::new(parse_route_id(id)?);
        self.lock()?.put(id.to_string(), Arc::clone(&route));
        Ok(route)
    }

    /// Retrieves a compiled route without compiling.
    pub fn get(&self, id: &str) -> Result<Option<Arc<CompiledRoute>>> {
        Ok(self.lock()?.get(id).cloned())
    }

    /// Checks if a route id is cached.
    ///
    /// A poisoned cache reports nothing cached; [`RouteCache::compile`] and
    /// the other fallible methods return [`RoutingError::CacheError`] for it.
    pub fn contains(&self, id: &str) -> bool {
        self.lock().map(|cache| cache.contains(id)).unwrap_or(false)
    }

    /// Removes a route from the cache.
    pub fn remove(&self, id: &str) -> Result<()> {
        self.lock()?.pop(id);
        Ok(())
    }

    /// Clears all cached routes.
    pub fn clear(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }

    /// Number of cached routes, or zero if the cache is poisoned.
    pub fn len(&self) -> usize {
        self.lock().map(|cache| cache.len()).unwrap_or(0)
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, LruCache<String, Arc<CompiledRoute>>>> {
        self.cache
            .lock()
            .map_err(|_| RoutingError::CacheError("Failed to acquire route cache lock".to_string()))
    }
}

impl Default for RouteCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_caches() {
        let cache = RouteCache::new(10);
        let first = cache.compile("/blog/[slug]").unwrap();
        let second = cache.compile("/blog/[slug]").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = RouteCache::new(10);
        assert!(cache.compile("/[b-c]").is_err());
        assert!(!cache.contains("/[b-c]"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_lru_eviction() {
        let cache = RouteCache::new(2);
        cache.compile("/a").unwrap();
        cache.compile("/b").unwrap();
        cache.compile("/a").unwrap();
        cache.compile("/c").unwrap();
        assert!(cache.contains("/a"));
        assert!(!cache.contains("/b"));
        assert!(cache.contains("/c"));
    }

    #[test]
    fn test_zero_capacity() {
        let cache = RouteCache::new(0);
        cache.compile("/a").unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = RouteCache::default();
        let clone = cache.clone();
        cache.compile("/x").unwrap();
        assert!(clone.contains("/x"));
        clone.clear().unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_poisoned_cache() {
        let cache = RouteCache::default();
        cache.compile("/a").unwrap();

        let shared = cache.clone();
        let panicked = std::thread::spawn(move || {
            let _guard = shared.cache.lock().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert!(panicked.is_err());

        assert!(matches!(cache.compile("/a"), Err(RoutingError::CacheError(_))));
        assert!(matches!(cache.get("/a"), Err(RoutingError::CacheError(_))));
        assert!(matches!(cache.clear(), Err(RoutingError::CacheError(_))));
        assert!(!cache.contains("/a"));
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_compilation() {
        let cache = RouteCache::default();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || cache.compile("/[[lang]]/docs/[...path]").unwrap())
            })
            .collect();
        let routes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for route in &routes {
            assert_eq!(route.pattern.as_str(), routes[0].pattern.as_str());
            assert_eq!(route.params, routes[0].params);
        }
        assert_eq!(cache.len(), 1);
    }
}
