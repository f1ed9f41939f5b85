//! Loanable assets and their interest rates.

use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::types::from_str_or_num;
use super::{dispatch, Page};
use crate::error::Result;
use crate::exchange::{ApiClient, Request};

const ENDPOINT: &str = "/sapi/v1/loan/vip/loanable/data";

pub struct VipLoanLoanableService<'a> {
    client: &'a dyn ApiClient,
    loan_coin: Option<String>,
    vip_level: Option<u32>,
}

impl<'a> VipLoanLoanableService<'a> {
    pub fn new(client: &'a dyn ApiClient) -> Self {
        Self {
            client,
            loan_coin: None,
            vip_level: None,
        }
    }

    pub fn loan_coin(mut self, coin: impl Into<String>) -> Self {
        self.loan_coin = Some(coin.into());
        self
    }

    /// Defaults to the account's own VIP level when unset.
    pub fn vip_level(mut self, level: u32) -> Self {
        self.vip_level = Some(level);
        self
    }

    fn build_request(&self) -> Request {
        let mut request = Request::signed(Method::GET, ENDPOINT);
        request
            .set_optional_param("loanCoin", self.loan_coin.as_deref())
            .set_optional_param("vipLevel", self.vip_level);
        request
    }

    /// Sends the request.
    #[instrument(skip(self), name = "vip_loan_loanable")]
    pub async fn send(&self) -> Result<Page<VipLoanLoanableAsset>> {
        let page: Page<VipLoanLoanableAsset> = dispatch(self.client, &self.build_request()).await?;
        debug!("Fetched {} loanable assets", page.rows.len());
        Ok(page)
    }
}

/// Borrowing limits and interest rates for one asset.
///
/// Fixed-term rates are only quoted for assets that offer 30/60 day terms,
/// and flexible rates only for assets that can be borrowed open-ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VipLoanLoanableAsset {
    pub loan_coin: String,
    #[serde(
        rename = "_flexibleDailyInterestRate",
        default,
        with = "rust_decimal::serde::str_option"
    )]
    pub flexible_daily_interest_rate: Option<Decimal>,
    #[serde(
        rename = "_flexibleYearlyInterestRate",
        default,
        with = "rust_decimal::serde::str_option"
    )]
    pub flexible_yearly_interest_rate: Option<Decimal>,
    #[serde(
        rename = "_30dDailyInterestRate",
        default,
        with = "rust_decimal::serde::str_option"
    )]
    pub daily_interest_rate_30d: Option<Decimal>,
    #[serde(
        rename = "_30dYearlyInterestRate",
        default,
        with = "rust_decimal::serde::str_option"
    )]
    pub yearly_interest_rate_30d: Option<Decimal>,
    #[serde(
        rename = "_60dDailyInterestRate",
        default,
        with = "rust_decimal::serde::str_option"
    )]
    pub daily_interest_rate_60d: Option<Decimal>,
    #[serde(
        rename = "_60dYearlyInterestRate",
        default,
        with = "rust_decimal::serde::str_option"
    )]
    pub yearly_interest_rate_60d: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str")]
    pub min_limit: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub max_limit: Decimal,
    #[serde(deserialize_with = "from_str_or_num")]
    pub vip_level: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vip_loan::test_support::expect_request;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_loanable_assets() {
        let client = expect_request(
            Method::GET,
            ENDPOINT,
            &[("loanCoin", "BUSD"), ("vipLevel", "1")],
            r#"{
                "total": 1,
                "rows": [
                    {
                        "loanCoin": "BUSD",
                        "_30dDailyInterestRate": "0.000136",
                        "_30dYearlyInterestRate": "0.03450",
                        "_60dDailyInterestRate": "0.000145",
                        "_60dYearlyInterestRate": "0.04103",
                        "minLimit": "100",
                        "maxLimit": "1000000",
                        "vipLevel": 1
                    }
                ]
            }"#,
        );

        let page = VipLoanLoanableService::new(&client)
            .loan_coin("BUSD")
            .vip_level(1)
            .send()
            .await
            .unwrap();

        assert_eq!(
            page.rows,
            vec![VipLoanLoanableAsset {
                loan_coin: "BUSD".to_string(),
                flexible_daily_interest_rate: None,
                flexible_yearly_interest_rate: None,
                daily_interest_rate_30d: Some(dec!(0.000136)),
                yearly_interest_rate_30d: Some(dec!(0.03450)),
                daily_interest_rate_60d: Some(dec!(0.000145)),
                yearly_interest_rate_60d: Some(dec!(0.04103)),
                min_limit: dec!(100),
                max_limit: dec!(1000000),
                vip_level: 1,
            }]
        );
    }

    #[test]
    fn test_flexible_only_asset() {
        let asset: VipLoanLoanableAsset = serde_json::from_str(
            r#"{
                "loanCoin": "USDT",
                "_flexibleDailyInterestRate": "0.001503",
                "_flexibleYearlyInterestRate": "0.548595",
                "minLimit": "100",
                "maxLimit": "1000000",
                "vipLevel": "2"
            }"#,
        )
        .unwrap();

        assert_eq!(asset.flexible_daily_interest_rate, Some(dec!(0.001503)));
        assert_eq!(asset.daily_interest_rate_30d, None);
        assert_eq!(asset.vip_level, 2);
    }
}
