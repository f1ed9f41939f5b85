//! # Binance VIP Loan
//!
//! Builder-style client for Binance's VIP loan REST endpoints.
//!
//! ## Architecture
//!
//! - `config`: Configuration management and validation
//! - `exchange`: Request description, signing, and HTTP dispatch
//! - `vip_loan`: One service per VIP loan endpoint with typed responses
//! - `error`: Error type shared by every call

pub mod config;
pub mod error;
pub mod exchange;
pub mod vip_loan;

pub use config::Config;
pub use error::{Error, Result};
pub use exchange::{ApiClient, BinanceClient};
