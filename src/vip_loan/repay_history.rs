//! VIP loan repayment history.

use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::types::from_str_or_num;
use super::{dispatch, Page, RepayStatus};
use crate::error::Result;
use crate::exchange::{ApiClient, Request};

const ENDPOINT: &str = "/sapi/v1/loan/vip/repay/history";

/// Queries past repayments, optionally bounded by order, coin, or time.
pub struct VipLoanRepayHistoryService<'a> {
    client: &'a dyn ApiClient,
    order_id: Option<u64>,
    loan_coin: Option<String>,
    start_time: Option<i64>,
    end_time: Option<i64>,
    current: Option<u32>,
    limit: Option<u32>,
}

impl<'a> VipLoanRepayHistoryService<'a> {
    pub fn new(client: &'a dyn ApiClient) -> Self {
        Self {
            client,
            order_id: None,
            loan_coin: None,
            start_time: None,
            end_time: None,
            current: None,
            limit: None,
        }
    }

    pub fn order_id(mut self, order_id: u64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    pub fn loan_coin(mut self, coin: impl Into<String>) -> Self {
        self.loan_coin = Some(coin.into());
        self
    }

    /// Unix ms, inclusive.
    pub fn start_time(mut self, ms: i64) -> Self {
        self.start_time = Some(ms);
        self
    }

    /// Unix ms, inclusive.
    pub fn end_time(mut self, ms: i64) -> Self {
        self.end_time = Some(ms);
        self
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
            .set_optional_param("orderId", self.order_id)
            .set_optional_param("loanCoin", self.loan_coin.as_deref())
            .set_optional_param("startTime", self.start_time)
            .set_optional_param("endTime", self.end_time)
            .set_optional_param("current", self.current)
            .set_optional_param("limit", self.limit);
        request
    }

    /// Sends the request.
    #[instrument(skip(self), name = "vip_loan_repay_history")]
    pub async fn send(&self) -> Result<Page<VipLoanRepayRecord>> {
        let page: Page<VipLoanRepayRecord> = dispatch(self.client, &self.build_request()).await?;
        debug!("Fetched {} of {} VIP loan repayments", page.rows.len(), page.total);
        Ok(page)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VipLoanRepayRecord {
    pub loan_coin: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub repay_amount: Decimal,
    pub collateral_coin: String,
    pub repay_status: RepayStatus,
    /// Unix ms
    #[serde(deserialize_with = "from_str_or_num")]
    pub repay_time: i64,
    #[serde(deserialize_with = "from_str_or_num")]
    pub order_id: u64,
}
