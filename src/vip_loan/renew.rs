//! VIP loan renewal.

use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{dispatch, require};
use crate::error::Result;
use crate::exchange::{ApiClient, Request};

const ENDPOINT: &str = "/sapi/v1/loan/vip/renew";

/// Extends a fixed-term VIP loan order by another term.
pub struct VipLoanRenewService<'a> {
    client: &'a dyn ApiClient,
    order_id: Option<u64>,
    loan_term: Option<u32>,
}

impl<'a> VipLoanRenewService<'a> {
    pub fn new(client: &'a dyn ApiClient) -> Self {
        Self {
            client,
            order_id: None,
            loan_term: None,
        }
    }

    pub fn order_id(mut self, order_id: u64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    /// Renewal term in days (30 or 60).
    pub fn loan_term(mut self, days: u32) -> Self {
        self.loan_term = Some(days);
        self
    }

    fn build_request(&self) -> Result<Request> {
        let mut request = Request::signed(Method::POST, ENDPOINT);
        request
            .set_param("orderId", require(self.order_id, "orderId")?)
            .set_param("loanTerm", require(self.loan_term, "loanTerm")?);
        Ok(request)
    }

    /// Sends the request.
    #[instrument(skip(self), name = "vip_loan_renew")]
    pub async fn send(&self) -> Result<VipLoanRenewResponse> {
        let request = self.build_request()?;
        dispatch(self.client, &request).await
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VipLoanRenewResponse {
    pub loan_account_id: String,
    pub loan_coin: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub loan_amount: Decimal,
    pub collateral_account_id: String,
    pub collateral_coin: String,
    pub loan_term: String,
}
