//! Transport seam between endpoint services and the HTTP client.
//!
//! Services only describe *what* to call through a [`Request`]; an
//! [`ApiClient`] decides how it is authenticated and sent. This keeps the
//! services testable against a mock and lets callers wrap the client
//! (rate limiting, recording) without touching endpoint code.

use async_trait::async_trait;

use super::request::Request;
use crate::error::Result;

/// Anything that can execute a Binance REST request and return the raw body.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Authenticate, send, and return the successful response body.
    ///
    /// Non-2xx responses are turned into [`crate::Error::Api`] or
    /// [`crate::Error::Status`].
    async fn call_api(&self, request: &Request) -> Result<Vec<u8>>;
}
