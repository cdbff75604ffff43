//! Response interception: control-directive routing and user-facing errors.

use memberhub_core::{
    CacheRegistry, ErrorDocument, NotificationSink, ResponseEnvelope, Severity, ERROR_CONTENT_TYPE,
};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::ClientError;

/// Cross-cutting handler run on every backend response.
///
/// Successful responses are scanned for embedded `_controls` and each
/// directive is routed to its cache through the injected registry. Failed
/// responses carrying an `application/vnd.error+json` document are turned
/// into notices and absorbed; everything else propagates to the caller.
#[derive(Clone)]
pub struct ResponseInterceptor {
    registry: CacheRegistry,
    sink: Arc<dyn NotificationSink>,
}

impl ResponseInterceptor {
    /// Create an interceptor over the given registry and notification sink.
    #[must_use]
    pub fn new(registry: CacheRegistry, sink: Arc<dyn NotificationSink>) -> Self {
        Self { registry, sink }
    }

    /// Apply any control directives embedded in a successful response body.
    ///
    /// Directives naming an unregistered collection are logged and skipped.
    /// The body itself passes through unchanged.
    ///
    /// # Errors
    /// Returns `ClientError::CacheError` when a directive's payload cannot
    /// be applied to its cache.
    pub fn apply_controls(&self, body: &Value) -> Result<(), ClientError> {
        let envelope = ResponseEnvelope::from_body(body);
        for control in &envelope.controls {
            let Some(name) = control.collection.as_deref() else {
                warn!(kind = %control.kind, "control without a collection name skipped");
                continue;
            };
            match self.registry.get(name) {
                Some(cache) => {
                    debug!(collection = %name, kind = %control.kind, "routing control");
                    cache.apply_control(control)?;
                }
                None => {
                    warn!(collection = %name, "control for unregistered collection skipped");
                }
            }
        }
        Ok(())
    }

    /// Inspect a failed response and decide whether it is user-facing.
    ///
    /// A body with the error content type and a `message` field is
    /// forwarded to the notification sink and absorbed.
    ///
    /// # Returns
    /// `true` when the failure was absorbed and must not propagate.
    pub fn intercept_failure(&self, status: u16, content_type: Option<&str>, body: &str) -> bool {
        if media_type(content_type) != Some(ERROR_CONTENT_TYPE) {
            return false;
        }

        match serde_json::from_str::<ErrorDocument>(body) {
            Ok(doc) => {
                debug!(status, "absorbing user-facing error");
                self.sink.notify(Severity::Error, doc.message);
                true
            }
            Err(e) => {
                warn!(status, error = %e, "error document without a usable message");
                false
            }
        }
    }
}

impl fmt::Debug for ResponseInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseInterceptor")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// The media type of a content-type header, parameters stripped.
fn media_type(content_type: Option<&str>) -> Option<&str> {
    content_type.map(|ct| ct.split(';').next().unwrap_or("").trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use memberhub_core::{EntityCache, EntityKey, MessageText, NoticeBoard};
    use serde_json::json;
    use std::sync::Mutex;

    struct CaptureSink {
        captured: Mutex<Vec<(Severity, Vec<String>)>>,
    }

    impl CaptureSink {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                captured: Mutex::new(Vec::new()),
            })
        }
    }

    impl NotificationSink for CaptureSink {
        fn notify(&self, severity: Severity, messages: MessageText) {
            self.captured
                .lock()
                .unwrap()
                .push((severity, messages.into_vec()));
        }
    }

    fn interceptor_with_circles() -> (ResponseInterceptor, EntityCache, Arc<CaptureSink>) {
        let registry = CacheRegistry::new();
        let circles = EntityCache::new("circles");
        registry.register("circles", circles.clone());
        let sink = CaptureSink::new();
        (
            ResponseInterceptor::new(registry, sink.clone()),
            circles,
            sink,
        )
    }

    #[test]
    fn test_controls_populate_named_cache() {
        let (interceptor, circles, _) = interceptor_with_circles();
        let body = json!({
            "_controls": [{
                "type": "replace-collection",
                "collection": "circles",
                "data": [{"id": 1, "name": "A"}]
            }]
        });

        interceptor.apply_controls(&body).unwrap();

        let value = circles.get_value(&EntityKey::Int(1)).unwrap();
        assert_eq!(value, json!({"id": 1, "name": "A"}));
    }

    #[test]
    fn test_body_without_controls_passes_through() {
        let (interceptor, circles, _) = interceptor_with_circles();
        interceptor.apply_controls(&json!({"id": 4})).unwrap();
        assert!(circles.is_empty());
    }

    #[test]
    fn test_control_for_unknown_collection_is_skipped() {
        let (interceptor, circles, _) = interceptor_with_circles();
        let body = json!({
            "_controls": [{
                "type": "replace-collection",
                "collection": "tools",
                "data": [{"id": 1}]
            }]
        });

        interceptor.apply_controls(&body).unwrap();
        assert!(circles.is_empty());
    }

    #[test]
    fn test_error_document_is_absorbed_and_notified() {
        let (interceptor, _, sink) = interceptor_with_circles();

        let absorbed = interceptor.intercept_failure(
            400,
            Some("application/vnd.error+json"),
            r#"{"message": "Bad username"}"#,
        );

        assert!(absorbed);
        let captured = sink.captured.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].0, Severity::Error);
        assert_eq!(captured[0].1, vec!["Bad username"]);
    }

    #[test]
    fn test_error_document_with_charset_parameter() {
        let (interceptor, _, sink) = interceptor_with_circles();

        let absorbed = interceptor.intercept_failure(
            400,
            Some("application/vnd.error+json; charset=utf-8"),
            r#"{"message": ["Bad username", "Bad password"]}"#,
        );

        assert!(absorbed);
        assert_eq!(sink.captured.lock().unwrap()[0].1.len(), 2);
    }

    #[test]
    fn test_other_content_types_propagate() {
        let (interceptor, _, sink) = interceptor_with_circles();

        let absorbed =
            interceptor.intercept_failure(500, Some("application/json"), r#"{"message": "boom"}"#);

        assert!(!absorbed);
        assert!(sink.captured.lock().unwrap().is_empty());
    }

    #[test]
    fn test_error_document_without_message_propagates() {
        let (interceptor, _, sink) = interceptor_with_circles();

        let absorbed =
            interceptor.intercept_failure(400, Some("application/vnd.error+json"), r#"{}"#);

        assert!(!absorbed);
        assert!(sink.captured.lock().unwrap().is_empty());
    }

    #[test]
    fn test_notice_board_is_a_sink() {
        let registry = CacheRegistry::new();
        let board = NoticeBoard::new();
        let interceptor = ResponseInterceptor::new(registry, Arc::new(board.clone()));

        interceptor.intercept_failure(
            400,
            Some("application/vnd.error+json"),
            r#"{"message": "Bad username"}"#,
        );

        assert_eq!(board.notices()[0].text, "Bad username");
    }
}
