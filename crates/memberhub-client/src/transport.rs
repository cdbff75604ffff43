//! HTTP transport: request execution with response interception.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::interceptor::ResponseInterceptor;

/// Executes verb + path requests against the backend and runs every
/// response through the interceptor.
///
/// There are no retries, no backoff, and no request fencing: a superseded
/// request's late response is still intercepted and applied to the caches.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// HTTP client for making requests.
    client: Client,
    /// Base URL of the backend, without a trailing slash.
    base_url: String,
    /// Cross-cutting response handler.
    interceptor: ResponseInterceptor,
}

impl HttpTransport {
    /// Create a transport from a validated configuration.
    ///
    /// # Errors
    /// Returns a `ClientError` if the configuration is invalid or the HTTP
    /// client cannot be created.
    pub fn new(
        config: &ClientConfig,
        interceptor: ResponseInterceptor,
    ) -> Result<Self, ClientError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ClientError::RequestError(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            interceptor,
        })
    }

    /// Issue a request and intercept the response.
    ///
    /// # Returns
    /// `Some(body)` for successful responses (after any embedded controls
    /// have been applied), `None` when a failure was absorbed as a
    /// user-facing notice.
    ///
    /// # Errors
    /// Returns a `ClientError` for network failures, non-success statuses
    /// that are not user-facing error documents, and malformed JSON.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Option<Value>, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, url = %url, "issuing request");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            error!(error = %e, url = %url, "request failed");
            if e.is_connect() {
                ClientError::RequestError(format!("Backend not reachable at {}", self.base_url))
            } else {
                ClientError::RequestError(format!("Network error: {}", e))
            }
        })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|h| h.to_str().ok())
            .map(ToString::to_string);

        let text = response
            .text()
            .await
            .map_err(|e| ClientError::RequestError(format!("Failed to read response: {}", e)))?;

        if status.is_success() {
            let value = if text.trim().is_empty() {
                Value::Null
            } else {
                serde_json::from_str(&text).map_err(|e| {
                    error!(error = %e, url = %url, "failed to parse response body");
                    ClientError::SerializationError(format!("Failed to parse response: {}", e))
                })?
            };

            self.interceptor.apply_controls(&value)?;
            return Ok(Some(value));
        }

        if self
            .interceptor
            .intercept_failure(status.as_u16(), content_type.as_deref(), &text)
        {
            return Ok(None);
        }

        Err(ClientError::ApiError {
            status: status.as_u16(),
            body: text,
        })
    }

    /// Issue a request and deserialize the passthrough body into `T`.
    ///
    /// # Returns
    /// `None` when the failure was absorbed as a notice, just like
    /// [`execute`](Self::execute).
    ///
    /// # Errors
    /// Additionally returns `ClientError::SerializationError` when the body
    /// does not match `T`.
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Option<T>, ClientError> {
        match self.execute(method, path, body).await? {
            Some(value) => {
                let typed = serde_json::from_value(value).map_err(|e| {
                    ClientError::SerializationError(format!("Failed to decode response: {}", e))
                })?;
                Ok(Some(typed))
            }
            None => Ok(None),
        }
    }

    /// GET a path.
    ///
    /// # Errors
    /// See [`execute`](Self::execute).
    pub async fn get(&self, path: &str) -> Result<Option<Value>, ClientError> {
        self.execute(Method::GET, path, None).await
    }

    /// POST a JSON payload to a path.
    ///
    /// # Errors
    /// See [`execute`](Self::execute).
    pub async fn post<T: Serialize>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Option<Value>, ClientError> {
        let body = to_body(payload)?;
        self.execute(Method::POST, path, Some(&body)).await
    }

    /// PUT a JSON payload to a path.
    ///
    /// # Errors
    /// See [`execute`](Self::execute).
    pub async fn put<T: Serialize>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Option<Value>, ClientError> {
        let body = to_body(payload)?;
        self.execute(Method::PUT, path, Some(&body)).await
    }

    /// DELETE a path, optionally with a JSON payload.
    ///
    /// # Errors
    /// See [`execute`](Self::execute).
    pub async fn delete<T: Serialize>(
        &self,
        path: &str,
        payload: Option<&T>,
    ) -> Result<Option<Value>, ClientError> {
        let body = payload.map(to_body).transpose()?;
        self.execute(Method::DELETE, path, body.as_ref()).await
    }
}

fn to_body<T: Serialize>(payload: &T) -> Result<Value, ClientError> {
    serde_json::to_value(payload)
        .map_err(|e| ClientError::SerializationError(format!("Failed to serialize payload: {}", e)))
}
