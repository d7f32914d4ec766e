/*!
 * Loader caches.
 *
 * The variant loader keeps parsed files in memory until it is told to
 * forget them. Storage sits behind `CachePort` so another backend can be
 * plugged in; `InMemoryCache` is the default.
 */

use log::debug;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Key/value cache used by the variant loader
pub trait CachePort<V>: Send + Sync {
    /// Cached value for `key`
    fn get(&self, key: &str) -> Option<V>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: V);

    /// Drop every entry
    fn clear(&self);

    /// Number of entries
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Hit and miss counters of a cache
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 { self.hits as f64 / total as f64 } else { 0.0 }
    }
}

/// In-process cache backed by a `HashMap`
pub struct InMemoryCache<V> {
    /// Internal cache storage
    entries: Arc<RwLock<HashMap<String, V>>>,

    /// Hit and miss counters
    stats: Arc<RwLock<CacheStats>>,

    /// Label used in debug logs
    name: &'static str,
}

impl<V: Clone> InMemoryCache<V> {
    pub fn new(name: &'static str) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            stats: Arc::new(RwLock::new(CacheStats::default())),
            name,
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        *self.stats.read()
    }
}

impl<V: Clone + Send + Sync> CachePort<V> for InMemoryCache<V> {
    fn get(&self, key: &str) -> Option<V> {
        let found = self.entries.read().get(key).cloned();

        let mut stats = self.stats.write();
        if found.is_some() {
            stats.hits += 1;
            debug!("{} cache hit for '{}'", self.name, key);
        } else {
            stats.misses += 1;
        }

        found
    }

    fn set(&self, key: &str, value: V) {
        self.entries.write().insert(key.to_string(), value);
    }

    fn clear(&self) {
        self.entries.write().clear();
        *self.stats.write() = CacheStats::default();
        debug!("{} cache cleared", self.name);
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}

impl<V: Clone> Clone for InMemoryCache<V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            stats: self.stats.clone(),
            name: self.name,
        }
    }
}
