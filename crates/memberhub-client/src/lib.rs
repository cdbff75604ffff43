//! HTTP client for the memberhub backend.
//!
//! The transport runs every response through an interceptor: successful
//! bodies may carry `_controls` directives that replace the contents of
//! named entity caches, and failures with the `application/vnd.error+json`
//! media type are absorbed into user-facing notices instead of surfacing
//! as errors. On top of the transport sit thin wrappers, one per backend
//! area, that map methods to verb + path requests.
//!
//! [`MemberClient::new`] assembles the whole thing from a configuration
//! and the server's boot payload.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod interceptor;
pub mod transport;

pub use client::{MemberClient, BADGE_DESCRIPTIONS_CACHE, CIRCLES_CACHE};
pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use interceptor::ResponseInterceptor;
pub use transport::HttpTransport;
