//! EntityCache implementation with in-place updates and change events.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;
use tracing::{debug, info};

use super::types::{CacheError, CacheEvent, EntityHandle, EntityKey, EntityMapper, EntityObject};
use crate::directives::{Control, REPLACE_COLLECTION};

/// Capacity of the change-event channel; slow subscribers lose old events.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Default mapper: the `id` field is the key, the entity itself the value.
///
/// # Errors
/// Returns `CacheError::NotAnObject` for non-object entities and
/// `CacheError::MissingKey` when `id` is absent or not a usable key.
pub fn map_by_id(raw: &Value) -> Result<(EntityKey, EntityObject), CacheError> {
    let obj = raw.as_object().ok_or(CacheError::NotAnObject)?;
    let key = obj
        .get("id")
        .and_then(EntityKey::from_value)
        .ok_or(CacheError::MissingKey)?;
    Ok((key, obj.clone()))
}

/// Like [`map_by_id`], but drops the `_embedded` field before caching.
///
/// Embedded related entities are view-specific and must not end up in the
/// shared cache.
///
/// # Errors
/// Same conditions as [`map_by_id`].
pub fn map_by_id_without_embedded(raw: &Value) -> Result<(EntityKey, EntityObject), CacheError> {
    let (key, mut obj) = map_by_id(raw)?;
    obj.remove("_embedded");
    Ok((key, obj))
}

/// An entry: the shared handle plus its slot in the ordered view.
struct CacheEntry {
    handle: EntityHandle,
    /// Assigned at first insertion, never reassigned.
    index: usize,
}

#[derive(Default)]
struct CacheInner {
    /// Key-indexed entries.
    entries: HashMap<EntityKey, CacheEntry>,
    /// Insertion-ordered view. Removal leaves a `None` hole; slots are
    /// never compacted so insertion indexes keep their meaning.
    ordered: Vec<Option<EntityHandle>>,
}

/// A keyed, insertion-ordered store of server entities.
///
/// Exposes two read views:
///  - [`get`](EntityCache::get): a key-indexed lookup
///  - [`values`](EntityCache::values): the insertion-ordered sequence
///
/// Handles retrieved from the cache stay valid for the entity's lifetime;
/// only their contents are replaced when fresh data arrives. Subscribers
/// receive a [`CacheEvent`] for every mutation.
#[derive(Clone)]
pub struct EntityCache {
    /// Collection name, used for logging and registry lookup.
    name: String,
    /// Extracts `(key, value)` from raw server entities.
    mapper: EntityMapper,
    inner: Arc<RwLock<CacheInner>>,
    events: broadcast::Sender<CacheEvent>,
}

impl EntityCache {
    /// Create a cache that keys entities by their `id` field.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_mapper(name, Arc::new(map_by_id))
    }

    /// Create a cache with a custom entity mapper.
    #[must_use]
    pub fn with_mapper(name: impl Into<String>, mapper: EntityMapper) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            name: name.into(),
            mapper,
            inner: Arc::new(RwLock::new(CacheInner::default())),
            events,
        }
    }

    /// The collection name this cache holds.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert or refresh an entity.
    ///
    /// An existing entry keeps its handle: the current fields are cleared
    /// and the new fields copied in, so holders of the handle observe the
    /// refreshed data. A new entry is assigned the next insertion index.
    ///
    /// # Errors
    /// Returns a `CacheError` when the mapper cannot produce a key.
    pub fn upsert(&self, raw: &Value) -> Result<(), CacheError> {
        let (key, value) = (self.mapper)(raw)?;
        let mut inner = self.inner.write().expect("cache lock poisoned");

        if let Some(entry) = inner.entries.get(&key) {
            debug!(cache = %self.name, key = %key, "replacing existing entry");
            let mut obj = entry.handle.write().expect("entry lock poisoned");
            obj.clear();
            obj.extend(value);
            drop(obj);
            drop(inner);
            let _ = self.events.send(CacheEvent::Updated(key));
        } else {
            debug!(cache = %self.name, key = %key, "creating new entry");
            let handle: EntityHandle = Arc::new(RwLock::new(value));
            let index = inner.ordered.len();
            inner.ordered.push(Some(Arc::clone(&handle)));
            inner.entries.insert(key.clone(), CacheEntry { handle, index });
            drop(inner);
            let _ = self.events.send(CacheEvent::Inserted(key));
        }

        Ok(())
    }

    /// Remove an entity.
    ///
    /// Deletes the keyed entry and nulls its slot in the ordered view. An
    /// unknown key is a no-op.
    ///
    /// # Returns
    /// `true` if an entry was removed, `false` if the key was absent.
    ///
    /// # Errors
    /// Returns a `CacheError` when the mapper cannot produce a key.
    pub fn remove(&self, raw: &Value) -> Result<bool, CacheError> {
        let (key, _) = (self.mapper)(raw)?;
        let mut inner = self.inner.write().expect("cache lock poisoned");

        match inner.entries.remove(&key) {
            Some(entry) => {
                inner.ordered[entry.index] = None;
                drop(inner);
                debug!(cache = %self.name, key = %key, "removed entry");
                let _ = self.events.send(CacheEvent::Removed(key));
                Ok(true)
            }
            None => {
                debug!(cache = %self.name, key = %key, "remove of unknown key ignored");
                Ok(false)
            }
        }
    }

    /// Upsert every item in sequence.
    ///
    /// Used for server-pushed "replace this collection" directives. Entities
    /// absent from `items` are not removed; partial updates accumulate.
    ///
    /// # Errors
    /// Returns the first `CacheError` raised by an item's mapping.
    pub fn replace_all(&self, items: &[Value]) -> Result<(), CacheError> {
        for item in items {
            self.upsert(item)?;
        }
        Ok(())
    }

    /// Apply a server control directive to this cache.
    ///
    /// Unrecognized directive types are logged and ignored.
    ///
    /// # Errors
    /// Returns a `CacheError` when a replace-collection item cannot be
    /// mapped to a key.
    pub fn apply_control(&self, control: &Control) -> Result<(), CacheError> {
        debug!(cache = %self.name, kind = %control.kind, "executing control");
        if control.kind == REPLACE_COLLECTION {
            self.replace_all(&control.data)
        } else {
            info!(cache = %self.name, kind = %control.kind, "unsupported control type");
            Ok(())
        }
    }

    /// Look up an entity handle by key.
    #[must_use]
    pub fn get(&self, key: &EntityKey) -> Option<EntityHandle> {
        let inner = self.inner.read().expect("cache lock poisoned");
        inner.entries.get(key).map(|e| Arc::clone(&e.handle))
    }

    /// Look up an entity and clone its current contents.
    #[must_use]
    pub fn get_value(&self, key: &EntityKey) -> Option<Value> {
        self.get(key)
            .map(|handle| Value::Object(handle.read().expect("entry lock poisoned").clone()))
    }

    /// Snapshot of the insertion-ordered view, holes included.
    #[must_use]
    pub fn values(&self) -> Vec<Option<EntityHandle>> {
        let inner = self.inner.read().expect("cache lock poisoned");
        inner.ordered.clone()
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let inner = self.inner.read().expect("cache lock poisoned");
        inner.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Subscribe to change events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }

    /// An immediately-available async handle to the cache.
    ///
    /// Lets consumers depend on the cache uniformly whether or not it is
    /// pre-populated; the value is always ready, nothing is lazily loaded.
    pub async fn ready(&self) -> Self {
        self.clone()
    }
}

impl fmt::Debug for EntityCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityCache")
            .field("name", &self.name)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
