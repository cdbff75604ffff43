//! Tool endpoints.

use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;
use crate::transport::HttpTransport;

/// Payload naming a tool to check out or in.
#[derive(Debug, Clone, Serialize)]
pub struct ToolForm {
    /// Tool id.
    pub tool: i64,
}

/// Payload for creating or updating a tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDetailsForm {
    /// Tool id; absent when creating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Tool name.
    pub name: String,
    /// Free-form description.
    pub description: String,
}

/// Tool checkout state and the tool registry.
#[derive(Debug, Clone)]
pub struct ToolApi {
    transport: HttpTransport,
}

impl ToolApi {
    /// Create the tool wrapper.
    #[must_use]
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// `GET /service/tool/recent-events`
    pub async fn recent_events(&self) -> Result<Option<Value>, ClientError> {
        self.transport.get("/service/tool/recent-events").await
    }

    /// `POST /service/tool/checkout`
    pub async fn checkout(&self, form: &ToolForm) -> Result<Option<Value>, ClientError> {
        self.transport.post("/service/tool/checkout", form).await
    }

    /// `POST /service/tool/checkin`
    pub async fn checkin(&self, form: &ToolForm) -> Result<Option<Value>, ClientError> {
        self.transport.post("/service/tool/checkin", form).await
    }

    /// `GET /data/tool`
    pub async fn list(&self) -> Result<Option<Value>, ClientError> {
        self.transport.get("/data/tool").await
    }

    /// `GET /data/tool/{id}`
    pub async fn get(&self, tool_id: i64) -> Result<Option<Value>, ClientError> {
        self.transport.get(&format!("/data/tool/{tool_id}")).await
    }

    /// `POST /data/tool`
    pub async fn add(&self, form: &ToolDetailsForm) -> Result<Option<Value>, ClientError> {
        self.transport.post("/data/tool", form).await
    }

    /// `PUT /data/tool`
    pub async fn update(&self, form: &ToolDetailsForm) -> Result<Option<Value>, ClientError> {
        self.transport.put("/data/tool", form).await
    }

    /// `POST /data/tool/{tool_id}/circle-requirements/{circle_id}`
    pub async fn add_circle_requirement(
        &self,
        tool_id: i64,
        circle_id: i64,
    ) -> Result<Option<Value>, ClientError> {
        self.transport
            .post(
                &format!("/data/tool/{tool_id}/circle-requirements/{circle_id}"),
                &serde_json::json!({}),
            )
            .await
    }

    /// `DELETE /data/tool/{tool_id}/circle-requirements/{circle_id}`
    pub async fn remove_circle_requirement(
        &self,
        tool_id: i64,
        circle_id: i64,
    ) -> Result<Option<Value>, ClientError> {
        self.transport
            .delete::<Value>(
                &format!("/data/tool/{tool_id}/circle-requirements/{circle_id}"),
                None,
            )
            .await
    }
}
