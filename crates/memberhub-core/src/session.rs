//! Logged-in profile state with merge-refresh and observer notification.

use serde_json::Value;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Capacity of the profile-update channel.
const EVENT_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Default)]
struct SessionInner {
    /// The logged-in profile, raw server JSON. `None` when logged out.
    profile: Option<Value>,
    /// Ids of circles the user may administer.
    admin_circles: Vec<i64>,
}

/// The client's view of who is logged in.
///
/// Profile updates are merged in place and broadcast to subscribers, so
/// views holding profile-derived state re-read it instead of polling.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<RwLock<SessionInner>>,
    events: broadcast::Sender<Value>,
}

impl Session {
    /// Create a logged-out session.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(RwLock::new(SessionInner::default())),
            events,
        }
    }

    /// Whether a profile is present.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        let inner = self.inner.read().expect("session lock poisoned");
        inner.profile.is_some()
    }

    /// Snapshot of the logged-in profile.
    #[must_use]
    pub fn profile(&self) -> Option<Value> {
        let inner = self.inner.read().expect("session lock poisoned");
        inner.profile.clone()
    }

    /// Snapshot of the profile's `account` object.
    #[must_use]
    pub fn account(&self) -> Option<Value> {
        self.profile().and_then(|p| p.get("account").cloned())
    }

    /// Set or clear the logged-in profile.
    pub fn set_logged_in(&self, profile: Option<Value>) {
        let mut inner = self.inner.write().expect("session lock poisoned");
        debug!(logged_in = profile.is_some(), "session state changed");
        inner.profile = profile;
    }

    /// Replace the set of admin-capable circle ids.
    pub fn set_admin_circles(&self, circle_ids: Vec<i64>) {
        let mut inner = self.inner.write().expect("session lock poisoned");
        inner.admin_circles = circle_ids;
    }

    /// Merge an updated profile fragment into the stored profile and
    /// notify subscribers with the merged result.
    ///
    /// Nested objects merge field by field; arrays and scalars are
    /// replaced wholesale. A refresh while logged out is ignored.
    pub fn refresh_profile(&self, updated: &Value) {
        let mut inner = self.inner.write().expect("session lock poisoned");
        let Some(profile) = inner.profile.as_mut() else {
            warn!("profile refresh while logged out ignored");
            return;
        };

        debug!("refreshing profile");
        merge_value(profile, updated);
        let snapshot = profile.clone();
        drop(inner);
        let _ = self.events.send(snapshot);
    }

    /// Subscribe to profile updates.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Value> {
        self.events.subscribe()
    }

    /// Whether the logged-in user belongs to the named circle.
    #[must_use]
    pub fn has_role(&self, circle_name: &str) -> bool {
        let inner = self.inner.read().expect("session lock poisoned");
        let Some(profile) = inner.profile.as_ref() else {
            return false;
        };
        circle_values(profile)
            .iter()
            .any(|c| c.get("name").and_then(Value::as_str) == Some(circle_name))
    }

    /// Whether the logged-in user may administer the given circle.
    #[must_use]
    pub fn can_admin_circle(&self, circle_id: i64) -> bool {
        let inner = self.inner.read().expect("session lock poisoned");
        inner.admin_circles.contains(&circle_id)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// The profile's circles, whether serialized as an array or as an
/// id-indexed object.
fn circle_values(profile: &Value) -> Vec<&Value> {
    match profile.get("circles") {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Object(map)) => map.values().collect(),
        _ => Vec::new(),
    }
}

/// Deep-merge `update` into `target`: objects merge per field, everything
/// else is replaced.
fn merge_value(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(t), Value::Object(u)) => {
            for (key, value) in u {
                match t.get_mut(key) {
                    Some(slot) => merge_value(slot, value),
                    None => {
                        t.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (t, u) => *t = u.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile() -> Value {
        json!({
            "account": {"id": 7, "username": "alice", "phone": null},
            "circles": [{"id": 1, "name": "door"}],
            "badges": {}
        })
    }

    #[test]
    fn test_logged_out_by_default() {
        let session = Session::new();
        assert!(!session.is_logged_in());
        assert!(session.profile().is_none());
        assert!(!session.has_role("door"));
    }

    #[test]
    fn test_set_logged_in_and_out() {
        let session = Session::new();
        session.set_logged_in(Some(profile()));
        assert!(session.is_logged_in());
        assert_eq!(session.account().unwrap()["id"], json!(7));

        session.set_logged_in(None);
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_has_role_matches_circle_name() {
        let session = Session::new();
        session.set_logged_in(Some(profile()));

        assert!(session.has_role("door"));
        assert!(!session.has_role("admin"));
    }

    #[test]
    fn test_has_role_with_object_shaped_circles() {
        let session = Session::new();
        session.set_logged_in(Some(json!({
            "account": {"id": 7},
            "circles": {"1": {"id": 1, "name": "door"}}
        })));

        assert!(session.has_role("door"));
    }

    #[test]
    fn test_refresh_merges_and_notifies() {
        let session = Session::new();
        session.set_logged_in(Some(profile()));
        let mut rx = session.subscribe();

        session.refresh_profile(&json!({
            "account": {"phone": "+4712345678"},
            "circles": [{"id": 1, "name": "door"}, {"id": 2, "name": "admin"}]
        }));

        let merged = session.profile().unwrap();
        // Untouched fields survive the merge
        assert_eq!(merged["account"]["username"], json!("alice"));
        assert_eq!(merged["account"]["phone"], json!("+4712345678"));
        // Arrays are replaced wholesale
        assert_eq!(merged["circles"].as_array().unwrap().len(), 2);

        let notified = rx.try_recv().unwrap();
        assert_eq!(notified, merged);
    }

    #[test]
    fn test_refresh_while_logged_out_is_ignored() {
        let session = Session::new();
        let mut rx = session.subscribe();

        session.refresh_profile(&json!({"account": {"id": 1}}));

        assert!(session.profile().is_none());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_can_admin_circle() {
        let session = Session::new();
        session.set_admin_circles(vec![1, 5]);

        assert!(session.can_admin_circle(5));
        assert!(!session.can_admin_circle(2));
    }
}
