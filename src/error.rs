//! Error types surfaced by the VIP loan client.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Binance rejected the request with its `{"code", "msg"}` payload.
    #[error("Binance API error {code} (HTTP {status}): {msg}")]
    Api { status: u16, code: i64, msg: String },

    #[error("Unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

impl Error {
    /// Binance error code, if the exchange returned one.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Error::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
