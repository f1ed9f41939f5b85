//! VIP loan endpoint services.
//!
//! Every endpoint gets one builder: set parameters with the fluent setters,
//! then `send()` to sign, dispatch, and decode. Builders borrow an
//! [`ApiClient`], so one client can back any number of calls.
//!
//! ```rust,ignore
//! let client = BinanceClient::new(&config.binance)?;
//! let orders = client
//!     .new_vip_loan_ongoing_orders_service()
//!     .loan_coin("USDT")
//!     .limit(10)
//!     .send()
//!     .await?;
//! ```
//!
//! | Service | Endpoint |
//! |---|---|
//! | [`VipLoanBorrowService`] | `POST /sapi/v1/loan/vip/borrow` |
//! | [`VipLoanRepayService`] | `POST /sapi/v1/loan/vip/repay` |
//! | [`VipLoanRenewService`] | `POST /sapi/v1/loan/vip/renew` |
//! | [`VipLoanOngoingOrdersService`] | `GET /sapi/v1/loan/vip/ongoing/orders` |
//! | [`VipLoanRepayHistoryService`] | `GET /sapi/v1/loan/vip/repay/history` |
//! | [`VipLoanCollateralService`] | `GET /sapi/v1/loan/vip/collateral/account` |
//! | [`VipLoanLoanableService`] | `GET /sapi/v1/loan/vip/loanable/data` |
//! | [`VipLoanApplicationService`] | `GET /sapi/v1/loan/vip/request/data` |
//! | [`VipLoanCollateralDataService`] | `GET /sapi/v1/loan/vip/collateral/data` |

mod application;
mod borrow;
mod collateral;
mod collateral_data;
mod loanable;
mod ongoing_orders;
mod renew;
mod repay;
mod repay_history;
mod types;

pub use application::*;
pub use borrow::*;
pub use collateral::*;
pub use collateral_data::*;
pub use loanable::*;
pub use ongoing_orders::*;
pub use renew::*;
pub use repay::*;
pub use repay_history::*;
pub use types::{Page, RepayStatus};

use crate::error::{Error, Result};
use crate::exchange::{ApiClient, BinanceClient, Request};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Send a request through the client and decode the JSON body.
async fn dispatch<T: DeserializeOwned>(client: &dyn ApiClient, request: &Request) -> Result<T> {
    let data = client.call_api(request).await?;
    debug!("Received {} byte(s) from {}", data.len(), request.endpoint());
    Ok(serde_json::from_slice(&data)?)
}

fn require<T>(value: Option<T>, name: &'static str) -> Result<T> {
    value.ok_or(Error::MissingParameter(name))
}

impl BinanceClient {
    pub fn new_vip_loan_borrow_service(&self) -> VipLoanBorrowService<'_> {
        VipLoanBorrowService::new(self)
    }

    pub fn new_vip_loan_repay_service(&self) -> VipLoanRepayService<'_> {
        VipLoanRepayService::new(self)
    }

    pub fn new_vip_loan_renew_service(&self) -> VipLoanRenewService<'_> {
        VipLoanRenewService::new(self)
    }

    pub fn new_vip_loan_ongoing_orders_service(&self) -> VipLoanOngoingOrdersService<'_> {
        VipLoanOngoingOrdersService::new(self)
    }

    pub fn new_vip_loan_repay_history_service(&self) -> VipLoanRepayHistoryService<'_> {
        VipLoanRepayHistoryService::new(self)
    }

    pub fn new_vip_loan_collateral_service(&self) -> VipLoanCollateralService<'_> {
        VipLoanCollateralService::new(self)
    }

    pub fn new_vip_loan_loanable_service(&self) -> VipLoanLoanableService<'_> {
        VipLoanLoanableService::new(self)
    }

    pub fn new_vip_loan_application_service(&self) -> VipLoanApplicationService<'_> {
        VipLoanApplicationService::new(self)
    }

    pub fn new_vip_loan_collateral_data_service(&self) -> VipLoanCollateralDataService<'_> {
        VipLoanCollateralDataService::new(self)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::exchange::{MockApiClient, Request, SecType};
    use reqwest::Method;

    /// Mock client expecting exactly one signed call with these parameters,
    /// answered with `body`.
    pub fn expect_request(
        method: Method,
        endpoint: &'static str,
        params: &[(&str, &str)],
        body: &'static str,
    ) -> MockApiClient {
        let expected: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let mut client = MockApiClient::new();
        client
            .expect_call_api()
            .withf(move |request: &Request| {
                *request.method() == method
                    && request.endpoint() == endpoint
                    && request.sec_type() == SecType::Signed
                    && request.params() == expected.as_slice()
            })
            .times(1)
            .returning(move |_| Ok(body.as_bytes().to_vec()));
        client
    }

    /// Mock client that fails the test if any call reaches it.
    pub fn never_called() -> MockApiClient {
        let mut client = MockApiClient::new();
        client.expect_call_api().never();
        client
    }
}
