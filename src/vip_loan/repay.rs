//! VIP loan repayment.

use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{dispatch, require, RepayStatus};
use crate::error::Result;
use crate::exchange::{ApiClient, Request};

const ENDPOINT: &str = "/sapi/v1/loan/vip/repay";

/// Repays part or all of an ongoing VIP loan order.
pub struct VipLoanRepayService<'a> {
    client: &'a dyn ApiClient,
    order_id: Option<u64>,
    amount: Option<Decimal>,
}

impl<'a> VipLoanRepayService<'a> {
    pub fn new(client: &'a dyn ApiClient) -> Self {
        Self {
            client,
            order_id: None,
            amount: None,
        }
    }

    pub fn order_id(mut self, order_id: u64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    fn build_request(&self) -> Result<Request> {
        let mut request = Request::signed(Method::POST, ENDPOINT);
        request
            .set_param("orderId", require(self.order_id, "orderId")?)
            .set_param("amount", require(self.amount, "amount")?);
        Ok(request)
    }

    /// Sends the request.
    #[instrument(skip(self), name = "vip_loan_repay")]
    pub async fn send(&self) -> Result<VipLoanRepayResponse> {
        let request = self.build_request()?;
        dispatch(self.client, &request).await
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VipLoanRepayResponse {
    pub loan_coin: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub repay_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub remaining_principal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub remaining_interest: Decimal,
    /// Comma-separated when the loan is backed by several coins
    pub collateral_coin: String,
    #[serde(rename = "currentLTV", with = "rust_decimal::serde::str")]
    pub current_ltv: Decimal,
    pub repay_status: RepayStatus,
}
