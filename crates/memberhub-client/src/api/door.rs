//! Door endpoints.

use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;
use crate::transport::HttpTransport;

/// Payload naming the doors to open.
#[derive(Debug, Clone, Serialize)]
pub struct OpenDoorsForm {
    /// Door keys, e.g. `frontdoor`.
    pub doors: Vec<String>,
}

/// Opening doors for accounts with access.
#[derive(Debug, Clone)]
pub struct DoorApi {
    transport: HttpTransport,
}

impl DoorApi {
    /// Create the door wrapper.
    #[must_use]
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// `POST /service/door/open`
    pub async fn open(&self, form: &OpenDoorsForm) -> Result<Option<Value>, ClientError> {
        self.transport.post("/service/door/open", form).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_open_doors_form_serializes_door_list() {
        let form = OpenDoorsForm {
            doors: vec!["frontdoor".to_string(), "workshop".to_string()],
        };
        assert_eq!(
            serde_json::to_value(&form).unwrap(),
            json!({"doors": ["frontdoor", "workshop"]})
        );
    }
}
