//! Status of submitted VIP loan applications.

use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::types::from_str_or_num_option;
use super::{dispatch, Page};
use crate::error::Result;
use crate::exchange::{ApiClient, Request};

const ENDPOINT: &str = "/sapi/v1/loan/vip/request/data";

/// Borrow requests are reviewed asynchronously; this lists their progress.
pub struct VipLoanApplicationService<'a> {
    client: &'a dyn ApiClient,
    current: Option<u32>,
    limit: Option<u32>,
}

impl<'a> VipLoanApplicationService<'a> {
    pub fn new(client: &'a dyn ApiClient) -> Self {
        Self {
            client,
            current: None,
            limit: None,
        }
    }

    pub fn current(mut self, page: u32) -> Self {
        self.current = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    fn build_request(&self) -> Request {
        let mut request = Request::signed(Method::GET, ENDPOINT);
        request
            .set_optional_param("current", self.current)
            .set_optional_param("limit", self.limit);
        request
    }

    /// Sends the request.
    #[instrument(skip(self), name = "vip_loan_applications")]
    pub async fn send(&self) -> Result<Page<VipLoanApplication>> {
        dispatch(self.client, &self.build_request()).await
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VipLoanApplication {
    pub loan_account_id: String,
    /// Assigned once the application is approved
    #[serde(default, deserialize_with = "from_str_or_num_option")]
    pub order_id: Option<u64>,
    pub request_id: String,
    pub loan_coin: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub loan_amount: Decimal,
    pub collateral_account_id: String,
    pub collateral_coin: String,
    #[serde(default)]
    pub loan_term: String,
    /// e.g. `Accepted_Pending`, `Approved`, `Rejected`, `Repaid`
    pub status: String,
    /// Unix ms
    #[serde(default, deserialize_with = "from_str_or_num_option")]
    pub loan_date: Option<i64>,
}
