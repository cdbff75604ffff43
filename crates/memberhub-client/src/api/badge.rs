//! Badge endpoints.

use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;
use crate::transport::HttpTransport;

/// Payload for awarding a badge to the logged-in account.
#[derive(Debug, Clone, Serialize)]
pub struct CreateBadgeForm {
    /// Badge title; matched against existing descriptions.
    pub title: String,
    /// Optional free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Badge descriptions and per-account badge lists.
#[derive(Debug, Clone)]
pub struct BadgeApi {
    transport: HttpTransport,
}

impl BadgeApi {
    /// Create the badge wrapper.
    #[must_use]
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// `GET /badge/badge-descriptions`
    pub async fn badge_descriptions(&self) -> Result<Option<Value>, ClientError> {
        self.transport.get("/badge/badge-descriptions").await
    }

    /// `POST /badge/create-badge`
    pub async fn create(&self, form: &CreateBadgeForm) -> Result<Option<Value>, ClientError> {
        self.transport.post("/badge/create-badge", form).await
    }

    /// `GET /badge/recent-badges`
    pub async fn recent_badges(&self) -> Result<Option<Value>, ClientError> {
        self.transport.get("/badge/recent-badges").await
    }

    /// `GET /badge/badges-for-user/{id}`
    pub async fn badges_for_user(&self, account_id: i64) -> Result<Option<Value>, ClientError> {
        self.transport.get(&format!("/badge/badges-for-user/{account_id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_badge_form_omits_empty_description() {
        let form = CreateBadgeForm {
            title: "laser-certified".to_string(),
            description: None,
        };
        assert_eq!(serde_json::to_value(&form).unwrap(), json!({"title": "laser-certified"}));
    }
}
