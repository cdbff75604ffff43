//! Entity caching: keyed + insertion-ordered stores with in-place updates.

mod cache;
mod registry;
mod types;

pub use cache::{map_by_id, map_by_id_without_embedded, EntityCache};
pub use registry::CacheRegistry;
pub use types::{CacheError, CacheEvent, EntityHandle, EntityKey, EntityMapper, EntityObject};
