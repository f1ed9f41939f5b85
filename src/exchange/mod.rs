//! Binance REST plumbing shared by every endpoint service.
//!
//! - [`Request`]: method, path, security class and ordered parameters
//! - [`ApiClient`]: the seam services dispatch through
//! - [`BinanceClient`]: reqwest-backed implementation with HMAC-SHA256 signing

mod client;
mod request;
mod traits;

pub use client::{BinanceClient, SPOT_BASE_URL};
pub use request::{Request, SecType};
pub use traits::ApiClient;

#[cfg(test)]
pub use traits::MockApiClient;
