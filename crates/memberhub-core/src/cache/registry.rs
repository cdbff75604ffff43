//! Registry mapping collection names to cache instances.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::cache::EntityCache;

/// Thread-safe mapping from collection name to cache.
///
/// The registry is populated once at client construction and consulted by
/// the response interceptor to route control directives. Looking up an
/// unregistered name is not an error here; callers decide whether to log
/// and skip.
#[derive(Debug, Clone, Default)]
pub struct CacheRegistry {
    caches: Arc<RwLock<HashMap<String, EntityCache>>>,
}

impl CacheRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a cache under a collection name.
    ///
    /// Registering the same name twice replaces the earlier cache.
    pub fn register(&self, name: impl Into<String>, cache: EntityCache) {
        let mut caches = self.caches.write().expect("registry lock poisoned");
        caches.insert(name.into(), cache);
    }

    /// Look up the cache for a collection name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<EntityCache> {
        let caches = self.caches.read().expect("registry lock poisoned");
        caches.get(name).cloned()
    }

    /// Registered collection names.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let caches = self.caches.read().expect("registry lock poisoned");
        caches.keys().cloned().collect()
    }

    /// Number of registered caches.
    #[must_use]
    pub fn len(&self) -> usize {
        let caches = self.caches.read().expect("registry lock poisoned");
        caches.len()
    }

    /// Whether no caches are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_register_and_get() {
        let registry = CacheRegistry::new();
        assert!(registry.is_empty());

        registry.register("circles", EntityCache::new("circles"));
        assert_eq!(registry.len(), 1);

        let cache = registry.get("circles").unwrap();
        assert_eq!(cache.name(), "circles");
    }

    #[test]
    fn test_registry_unknown_name() {
        let registry = CacheRegistry::new();
        assert!(registry.get("tools").is_none());
    }

    #[test]
    fn test_registry_lookup_shares_state() {
        let registry = CacheRegistry::new();
        let cache = EntityCache::new("circles");
        registry.register("circles", cache.clone());

        registry
            .get("circles")
            .unwrap()
            .upsert(&serde_json::json!({"id": 1}))
            .unwrap();

        assert_eq!(cache.len(), 1);
    }
}
