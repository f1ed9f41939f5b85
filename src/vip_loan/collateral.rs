//! Locked value of VIP collateral accounts.

use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{dispatch, Page};
use crate::error::Result;
use crate::exchange::{ApiClient, Request};

const ENDPOINT: &str = "/sapi/v1/loan/vip/collateral/account";

pub struct VipLoanCollateralService<'a> {
    client: &'a dyn ApiClient,
    order_id: Option<u64>,
    collateral_account_id: Option<String>,
}

impl<'a> VipLoanCollateralService<'a> {
    pub fn new(client: &'a dyn ApiClient) -> Self {
        Self {
            client,
            order_id: None,
            collateral_account_id: None,
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

    fn build_request(&self) -> Request {
        let mut request = Request::signed(Method::GET, ENDPOINT);
        request
            .set_optional_param("orderId", self.order_id)
            .set_optional_param("collateralAccountId", self.collateral_account_id.as_deref());
        request
    }

    /// Sends the request.
    #[instrument(skip(self), name = "vip_loan_collateral")]
    pub async fn send(&self) -> Result<Page<VipLoanCollateral>> {
        dispatch(self.client, &self.build_request()).await
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VipLoanCollateral {
    pub collateral_account_id: String,
    pub collateral_coin: String,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub collateral_value: Option<Decimal>,
}
