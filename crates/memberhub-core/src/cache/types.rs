//! Key, handle, and event types for the entity cache.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// The mutable field map of a cached entity.
pub type EntityObject = serde_json::Map<String, Value>;

/// Shared handle to a cached entity.
///
/// The handle is handed out once per key and never replaced; upserts mutate
/// the fields behind it, so every holder observes refreshed data without
/// re-fetching.
pub type EntityHandle = Arc<RwLock<EntityObject>>;

/// Maps a raw server entity to its cache key and field map.
pub type EntityMapper =
    Arc<dyn Fn(&Value) -> Result<(EntityKey, EntityObject), CacheError> + Send + Sync>;

/// A cache key, stable for the entity's lifetime.
///
/// Server ids are either JSON numbers or strings; both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityKey {
    /// Numeric id.
    Int(i64),
    /// String id.
    Text(String),
}

impl EntityKey {
    /// Extracts a key from a JSON value, if it is a usable id.
    ///
    /// # Returns
    /// `Some(EntityKey)` for integers and strings, `None` otherwise.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(EntityKey::Int),
            Value::String(s) => Some(EntityKey::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKey::Int(n) => write!(f, "{n}"),
            EntityKey::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for EntityKey {
    fn from(n: i64) -> Self {
        EntityKey::Int(n)
    }
}

impl From<&str> for EntityKey {
    fn from(s: &str) -> Self {
        EntityKey::Text(s.to_string())
    }
}

impl From<String> for EntityKey {
    fn from(s: String) -> Self {
        EntityKey::Text(s)
    }
}

/// Change notification emitted by a cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    /// A new entry was created.
    Inserted(EntityKey),
    /// An existing entry had its contents replaced.
    Updated(EntityKey),
    /// An entry was removed.
    Removed(EntityKey),
}

/// Errors raised by cache operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The raw entity carries no usable key field.
    #[error("entity has no usable key field")]
    MissingKey,

    /// The raw entity is not a JSON object.
    #[error("entity is not a JSON object")]
    NotAnObject,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_from_number() {
        assert_eq!(EntityKey::from_value(&json!(7)), Some(EntityKey::Int(7)));
    }

    #[test]
    fn test_key_from_string() {
        assert_eq!(
            EntityKey::from_value(&json!("abc")),
            Some(EntityKey::Text("abc".to_string()))
        );
    }

    #[test]
    fn test_key_from_unusable_value() {
        assert_eq!(EntityKey::from_value(&json!(null)), None);
        assert_eq!(EntityKey::from_value(&json!([1, 2])), None);
        assert_eq!(EntityKey::from_value(&json!(1.5)), None);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(EntityKey::Int(42).to_string(), "42");
        assert_eq!(EntityKey::from("door").to_string(), "door");
    }
}
