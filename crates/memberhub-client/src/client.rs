//! Client construction: caches, registry, interceptor, transport, and the
//! endpoint wrappers, wired together from one configuration and one boot
//! payload.

use std::sync::Arc;

use memberhub_core::boot::BootState;
use memberhub_core::cache::{map_by_id_without_embedded, CacheRegistry, EntityCache};
use memberhub_core::directives::Control;
use memberhub_core::notify::NoticeBoard;
use memberhub_core::session::Session;
use tracing::debug;

use crate::api::{AuthzApi, BadgeApi, CoreApi, DoorApi, LabelApi, ToolApi};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::interceptor::ResponseInterceptor;
use crate::transport::HttpTransport;

/// Collection name the backend uses for circle entities.
pub const CIRCLES_CACHE: &str = "circles";
/// Collection name the backend uses for badge descriptions.
pub const BADGE_DESCRIPTIONS_CACHE: &str = "badge-descriptions";

/// The assembled client: shared caches, session, notices, and one wrapper
/// per backend area.
#[derive(Debug, Clone)]
pub struct MemberClient {
    registry: CacheRegistry,
    circles: EntityCache,
    badge_descriptions: EntityCache,
    notices: Arc<NoticeBoard>,
    session: Session,
    billing_pubkey: Option<String>,
    authz: AuthzApi,
    core: CoreApi,
    badge: BadgeApi,
    door: DoorApi,
    tool: ToolApi,
    label: LabelApi,
}

impl MemberClient {
    /// Build a client and replay the boot payload into it.
    ///
    /// The boot payload is consumed here, once: the profile seeds the
    /// session, admin circle ids seed authorization checks, and the
    /// initial circle and badge-description entities are replayed into
    /// their caches through the same replace path server controls use.
    ///
    /// # Errors
    /// Returns a `ClientError` if the configuration is invalid, the HTTP
    /// client cannot be created, or a boot entity lacks an `id`.
    pub fn new(config: &ClientConfig, boot: BootState) -> Result<Self, ClientError> {
        let circles =
            EntityCache::with_mapper(CIRCLES_CACHE, Arc::new(map_by_id_without_embedded));
        let badge_descriptions = EntityCache::with_mapper(
            BADGE_DESCRIPTIONS_CACHE,
            Arc::new(map_by_id_without_embedded),
        );

        let registry = CacheRegistry::new();
        registry.register(CIRCLES_CACHE, circles.clone());
        registry.register(BADGE_DESCRIPTIONS_CACHE, badge_descriptions.clone());

        let notices = Arc::new(NoticeBoard::new());
        let session = Session::new();
        let interceptor = ResponseInterceptor::new(registry.clone(), notices.clone());
        let transport = HttpTransport::new(config, interceptor)?;

        debug!(
            logged_in = boot.profile.is_some(),
            circles = boot.circles.len(),
            badge_descriptions = boot.badge_descriptions.len(),
            "replaying boot state"
        );
        session.set_logged_in(boot.profile);
        session.set_admin_circles(boot.circles_with_admin_access);
        circles.apply_control(&Control::replace_with(boot.circles))?;
        badge_descriptions.apply_control(&Control::replace_with(boot.badge_descriptions))?;

        Ok(Self {
            registry,
            circles,
            badge_descriptions,
            notices,
            session: session.clone(),
            billing_pubkey: boot.billing_pubkey,
            authz: AuthzApi::new(transport.clone(), session),
            core: CoreApi::new(transport.clone()),
            badge: BadgeApi::new(transport.clone()),
            door: DoorApi::new(transport.clone()),
            tool: ToolApi::new(transport.clone()),
            label: LabelApi::new(transport),
        })
    }

    /// The name to cache registry the interceptor dispatches controls to.
    #[must_use]
    pub fn registry(&self) -> &CacheRegistry {
        &self.registry
    }

    /// The shared circles cache.
    #[must_use]
    pub fn circles(&self) -> &EntityCache {
        &self.circles
    }

    /// The shared badge-description cache.
    #[must_use]
    pub fn badge_descriptions(&self) -> &EntityCache {
        &self.badge_descriptions
    }

    /// User-facing notices accumulated from intercepted failures.
    #[must_use]
    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    /// The authenticated session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Publishable billing key from the boot payload, if configured.
    #[must_use]
    pub fn billing_pubkey(&self) -> Option<&str> {
        self.billing_pubkey.as_deref()
    }

    /// Log-in and log-out.
    #[must_use]
    pub fn authz(&self) -> &AuthzApi {
        &self.authz
    }

    /// Accounts, circles, companies, and membership billing.
    #[must_use]
    pub fn core(&self) -> &CoreApi {
        &self.core
    }

    /// Badges.
    #[must_use]
    pub fn badge(&self) -> &BadgeApi {
        &self.badge
    }

    /// Doors.
    #[must_use]
    pub fn door(&self) -> &DoorApi {
        &self.door
    }

    /// Tools.
    #[must_use]
    pub fn tool(&self) -> &ToolApi {
        &self.tool
    }

    /// Label printing.
    #[must_use]
    pub fn label(&self) -> &LabelApi {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> ClientConfig {
        ClientConfig::new("http://localhost:8080")
    }

    #[test]
    fn test_boot_state_seeds_caches_and_session() {
        let boot: BootState = serde_json::from_value(json!({
            "profile": {"account": {"id": 1, "username": "alice"}, "circles": ["admin"]},
            "circles": [{"id": 1, "name": "door"}, {"id": 2, "name": "admin"}],
            "badgeDescriptions": [{"id": 10, "title": "Laser"}],
            "circlesWithAdminAccess": [2],
            "stripe_pubkey": "pk_test_123"
        }))
        .unwrap();

        let client = MemberClient::new(&config(), boot).unwrap();

        assert!(client.session().is_logged_in());
        assert!(client.session().can_admin_circle(2));
        assert!(!client.session().can_admin_circle(1));
        assert_eq!(client.circles().len(), 2);
        assert_eq!(client.badge_descriptions().len(), 1);
        assert_eq!(client.billing_pubkey(), Some("pk_test_123"));
        assert!(client.notices().is_empty());
        assert!(client.registry().get(CIRCLES_CACHE).is_some());
        assert!(client.registry().get(BADGE_DESCRIPTIONS_CACHE).is_some());
    }

    #[test]
    fn test_anonymous_boot_leaves_session_logged_out() {
        let client = MemberClient::new(&config(), BootState::default()).unwrap();
        assert!(!client.session().is_logged_in());
        assert!(client.circles().is_empty());
        assert!(client.billing_pubkey().is_none());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let bad = ClientConfig::new("");
        assert!(MemberClient::new(&bad, BootState::default()).is_err());
    }
}
