//! Authentication endpoints.

use memberhub_core::Session;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::ClientError;
use crate::transport::HttpTransport;

/// Credentials for logging in.
#[derive(Debug, Clone, Serialize)]
pub struct LoginForm {
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
}

/// Login and logout, kept in step with the session.
#[derive(Debug, Clone)]
pub struct AuthzApi {
    transport: HttpTransport,
    session: Session,
}

impl AuthzApi {
    /// Create the authz wrapper.
    #[must_use]
    pub fn new(transport: HttpTransport, session: Session) -> Self {
        Self { transport, session }
    }

    /// `POST /service/authz/log-in`
    ///
    /// On success the returned profile is stored in the session. A rejected
    /// login with a user-facing error document surfaces as a notice and
    /// returns `None`; the session is left untouched.
    ///
    /// # Errors
    /// Returns a `ClientError` for non-user-facing failures.
    pub async fn log_in(&self, form: &LoginForm) -> Result<Option<Value>, ClientError> {
        let response = self.transport.post("/service/authz/log-in", form).await?;
        if let Some(profile) = &response {
            debug!(username = %form.username, "logged in");
            self.session.set_logged_in(Some(profile.clone()));
        }
        Ok(response)
    }

    /// `POST /service/authz/log-out`
    ///
    /// On success the session is cleared.
    ///
    /// # Errors
    /// Returns a `ClientError` for non-user-facing failures.
    pub async fn log_out(&self) -> Result<Option<Value>, ClientError> {
        let response = self.transport.post("/service/authz/log-out", &json!({})).await?;
        if response.is_some() {
            debug!("logged out");
            self.session.set_logged_in(None);
        }
        Ok(response)
    }
}
