//! Client error types.

use memberhub_core::CacheError;
use thiserror::Error;

use crate::config::ConfigError;

/// Represents an error that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// An error occurred during the HTTP request (network issues, invalid
    /// request construction).
    #[error("Request Error: {0}")]
    RequestError(String),

    /// The backend rejected the request with a non-success status that was
    /// not a user-facing error document.
    #[error("API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body, for the caller to log or ignore.
        body: String,
    },

    /// An error occurred during serialization or deserialization.
    #[error("Serialization Error: {0}")]
    SerializationError(String),

    /// A server-pushed control directive could not be applied.
    #[error("Cache Error: {0}")]
    CacheError(#[from] CacheError),

    /// The client configuration is invalid.
    #[error("Configuration Error: {0}")]
    ConfigError(#[from] ConfigError),
}
