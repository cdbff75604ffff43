//! Initial application state delivered by the server at page load.
//!
//! The boot payload is an explicit value handed to client construction and
//! consumed there, once. Nothing ambient survives it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Server-rendered initial state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BootState {
    /// The already-authenticated profile, if a session exists.
    pub profile: Option<Value>,

    /// Initial circle entities, replayed into the circles cache.
    pub circles: Vec<Value>,

    /// Initial badge descriptions, replayed into their cache.
    pub badge_descriptions: Vec<Value>,

    /// Ids of circles the user may administer.
    pub circles_with_admin_access: Vec<i64>,

    /// Publishable key for the billing provider's browser SDK.
    #[serde(rename = "stripe_pubkey")]
    pub billing_pubkey: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_boot_state_parses_server_payload() {
        let boot: BootState = serde_json::from_value(json!({
            "profile": {"account": {"id": 1, "username": "alice"}},
            "circles": [{"id": 1, "name": "door"}],
            "badgeDescriptions": [{"id": 10, "title": "Laser"}],
            "circlesWithAdminAccess": [1],
            "stripe_pubkey": "pk_test_123"
        }))
        .unwrap();

        assert!(boot.profile.is_some());
        assert_eq!(boot.circles.len(), 1);
        assert_eq!(boot.badge_descriptions.len(), 1);
        assert_eq!(boot.circles_with_admin_access, vec![1]);
        assert_eq!(boot.billing_pubkey.as_deref(), Some("pk_test_123"));
    }

    #[test]
    fn test_boot_state_defaults_to_anonymous() {
        let boot: BootState = serde_json::from_value(json!({})).unwrap();
        assert!(boot.profile.is_none());
        assert!(boot.circles.is_empty());
        assert!(boot.billing_pubkey.is_none());
    }
}
