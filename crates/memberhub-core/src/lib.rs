//! Core state for the memberhub client.
//!
//! This crate holds everything the HTTP layer mutates and the UI reads:
//!
//! - **Entity caches**: keyed + insertion-ordered stores whose entries are
//!   refreshed in place, so handles stay valid across updates
//! - **Control directives**: the wire protocol by which the server pushes
//!   cache updates inside ordinary responses
//! - **Notification center**: the user-facing message list
//! - **Session**: the logged-in profile with merge-refresh and observers
//! - **Boot state**: the initial payload consumed once at construction

pub mod boot;
pub mod cache;
pub mod directives;
pub mod notify;
pub mod session;

pub use boot::BootState;
pub use cache::{
    map_by_id, map_by_id_without_embedded, CacheError, CacheEvent, CacheRegistry, EntityCache,
    EntityHandle, EntityKey, EntityMapper, EntityObject,
};
pub use directives::{
    Control, ErrorDocument, MessageText, ResponseEnvelope, ERROR_CONTENT_TYPE, REPLACE_COLLECTION,
};
pub use notify::{Notice, NotificationSink, NoticeBoard, Severity};
pub use session::Session;
