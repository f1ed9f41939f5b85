//! Ongoing VIP loan orders.

use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::types::{from_str_or_num, from_str_or_num_option};
use super::{dispatch, Page};
use crate::error::Result;
use crate::exchange::{ApiClient, Request};

const ENDPOINT: &str = "/sapi/v1/loan/vip/ongoing/orders";

/// Lists the caller's open VIP loan orders. All filters are optional.
pub struct VipLoanOngoingOrdersService<'a> {
    client: &'a dyn ApiClient,
    order_id: Option<u64>,
    collateral_account_id: Option<String>,
    loan_coin: Option<String>,
    collateral_coin: Option<String>,
    current: Option<u32>,
    limit: Option<u32>,
}

impl<'a> VipLoanOngoingOrdersService<'a> {
    pub fn new(client: &'a dyn ApiClient) -> Self {
        Self {
            client,
            order_id: None,
            collateral_account_id: None,
            loan_coin: None,
            collateral_coin: None,
            current: None,
            limit: None,
        }
    }

    pub fn order_id(mut self, order_id: u64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    pub fn collateral_account_id(mut self, id: impl Into<String>) -> Self {
        self.collateral_account_id = Some(id.into());
        self
    }

    pub fn loan_coin(mut self, coin: impl Into<String>) -> Self {
        self.loan_coin = Some(coin.into());
        self
    }

    pub fn collateral_coin(mut self, coin: impl Into<String>) -> Self {
        self.collateral_coin = Some(coin.into());
        self
    }

    /// 1-based page number.
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
            .set_optional_param("orderId", self.order_id)
            .set_optional_param("collateralAccountId", self.collateral_account_id.as_deref())
            .set_optional_param("loanCoin", self.loan_coin.as_deref())
            .set_optional_param("collateralCoin", self.collateral_coin.as_deref())
            .set_optional_param("current", self.current)
            .set_optional_param("limit", self.limit);
        request
    }

    /// Sends the request.
    #[instrument(skip(self), name = "vip_loan_ongoing_orders")]
    pub async fn send(&self) -> Result<Page<VipLoanOngoingOrder>> {
        let page: Page<VipLoanOngoingOrder> = dispatch(self.client, &self.build_request()).await?;
        debug!("Fetched {} of {} ongoing VIP loan orders", page.rows.len(), page.total);
        Ok(page)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VipLoanOngoingOrder {
    #[serde(deserialize_with = "from_str_or_num")]
    pub order_id: u64,
    pub loan_coin: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_debt: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub residual_interest: Decimal,
    pub collateral_account_id: String,
    pub collateral_coin: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_collateral_value_after_haircut: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub locked_collateral_value: Decimal,
    #[serde(rename = "currentLTV", with = "rust_decimal::serde::str")]
    pub current_ltv: Decimal,
    /// Unix ms
    #[serde(deserialize_with = "from_str_or_num")]
    pub expiration_time: i64,
    /// Unix ms
    #[serde(default, deserialize_with = "from_str_or_num_option")]
    pub loan_date: Option<i64>,
    #[serde(default)]
    pub loan_term: Option<String>,
}
