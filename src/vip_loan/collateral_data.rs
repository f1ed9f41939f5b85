//! Collateral asset tiers.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{dispatch, Page};
use crate::error::Result;
use crate::exchange::{ApiClient, Request};

const ENDPOINT: &str = "/sapi/v1/loan/vip/collateral/data";

/// Haircut tiers applied to each accepted collateral coin.
pub struct VipLoanCollateralDataService<'a> {
    client: &'a dyn ApiClient,
    collateral_coin: Option<String>,
}

impl<'a> VipLoanCollateralDataService<'a> {
    pub fn new(client: &'a dyn ApiClient) -> Self {
        Self {
            client,
            collateral_coin: None,
        }
    }

    pub fn collateral_coin(mut self, coin: impl Into<String>) -> Self {
        self.collateral_coin = Some(coin.into());
        self
    }

    fn build_request(&self) -> Request {
        let mut request = Request::signed(Method::GET, ENDPOINT);
        request.set_optional_param("collateralCoin", self.collateral_coin.as_deref());
        request
    }

    /// Sends the request.
    #[instrument(skip(self), name = "vip_loan_collateral_data")]
    pub async fn send(&self) -> Result<Page<VipLoanCollateralAsset>> {
        dispatch(self.client, &self.build_request()).await
    }
}

/// Ratios are quoted as percentages (`"80%"`) and ranges as USD value bands
/// (`"10000000-100000000"`, `">10000000000"`), so both stay as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VipLoanCollateralAsset {
    pub collateral_coin: String,
    #[serde(rename = "_1stCollateralRatio", default)]
    pub first_collateral_ratio: Option<String>,
    #[serde(rename = "_1stCollateralRange", default)]
    pub first_collateral_range: Option<String>,
    #[serde(rename = "_2ndCollateralRatio", default)]
    pub second_collateral_ratio: Option<String>,
    #[serde(rename = "_2ndCollateralRange", default)]
    pub second_collateral_range: Option<String>,
    #[serde(rename = "_3rdCollateralRatio", default)]
    pub third_collateral_ratio: Option<String>,
    #[serde(rename = "_3rdCollateralRange", default)]
    pub third_collateral_range: Option<String>,
    #[serde(rename = "_4thCollateralRatio", default)]
    pub fourth_collateral_ratio: Option<String>,
    #[serde(rename = "_4thCollateralRange", default)]
    pub fourth_collateral_range: Option<String>,
}
