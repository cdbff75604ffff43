//! Label printing endpoints.

use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;
use crate::transport::HttpTransport;

/// Payload naming the account to print a storage-box label for.
#[derive(Debug, Clone, Serialize)]
pub struct BoxLabelForm {
    /// Account id of the box owner.
    pub user: i64,
}

/// Printing physical labels on the workshop printer.
#[derive(Debug, Clone)]
pub struct LabelApi {
    transport: HttpTransport,
}

impl LabelApi {
    /// Create the label wrapper.
    #[must_use]
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// `POST /service/label/print_box_label`
    pub async fn print_box_label(&self, form: &BoxLabelForm) -> Result<Option<Value>, ClientError> {
        self.transport.post("/service/label/print_box_label", form).await
    }
}
