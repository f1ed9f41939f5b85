//! VIP loan borrowing.

use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{dispatch, require};
use crate::error::{Error, Result};
use crate::exchange::{ApiClient, Request};

const ENDPOINT: &str = "/sapi/v1/loan/vip/borrow";

/// Opens a new VIP loan against one or more collateral accounts.
pub struct VipLoanBorrowService<'a> {
    client: &'a dyn ApiClient,
    loan_account_id: Option<String>,
    loan_coin: Option<String>,
    loan_amount: Option<Decimal>,
    collateral_account_ids: Vec<String>,
    collateral_coins: Vec<String>,
    loan_term: Option<u32>,
    is_flexible_rate: Option<bool>,
}

impl<'a> VipLoanBorrowService<'a> {
    pub fn new(client: &'a dyn ApiClient) -> Self {
        Self {
            client,
            loan_account_id: None,
            loan_coin: None,
            loan_amount: None,
            collateral_account_ids: Vec::new(),
            collateral_coins: Vec::new(),
            loan_term: None,
            is_flexible_rate: None,
        }
    }

    pub fn loan_account_id(mut self, id: impl Into<String>) -> Self {
        self.loan_account_id = Some(id.into());
        self
    }

    pub fn loan_coin(mut self, coin: impl Into<String>) -> Self {
        self.loan_coin = Some(coin.into());
        self
    }

    pub fn loan_amount(mut self, amount: Decimal) -> Self {
        self.loan_amount = Some(amount);
        self
    }

    /// Adds a collateral account. Call once per account.
    pub fn collateral_account_id(mut self, id: impl Into<String>) -> Self {
        self.collateral_account_ids.push(id.into());
        self
    }

    /// Adds a collateral coin. Call once per coin, in the same order as the
    /// collateral accounts.
    pub fn collateral_coin(mut self, coin: impl Into<String>) -> Self {
        self.collateral_coins.push(coin.into());
        self
    }

    /// Loan term in days (30 or 60). Only applies to fixed-rate loans; unless
    /// `is_flexible_rate` is set explicitly, a term marks the loan fixed-rate.
    pub fn loan_term(mut self, days: u32) -> Self {
        self.loan_term = Some(days);
        self
    }

    /// Binance treats an absent flag as `true`.
    pub fn is_flexible_rate(mut self, flexible: bool) -> Self {
        self.is_flexible_rate = Some(flexible);
        self
    }

    fn build_request(&self) -> Result<Request> {
        if self.collateral_account_ids.is_empty() {
            return Err(Error::MissingParameter("collateralAccountId"));
        }
        if self.collateral_coins.is_empty() {
            return Err(Error::MissingParameter("collateralCoin"));
        }

        let mut request = Request::signed(Method::POST, ENDPOINT);
        request
            .set_param(
                "loanAccountId",
                require(self.loan_account_id.as_deref(), "loanAccountId")?,
            )
            .set_param("loanCoin", require(self.loan_coin.as_deref(), "loanCoin")?)
            .set_param("loanAmount", require(self.loan_amount, "loanAmount")?)
            .set_param("collateralAccountId", self.collateral_account_ids.join(","))
            .set_param("collateralCoin", self.collateral_coins.join(","))
            .set_optional_param("loanTerm", self.loan_term)
            .set_optional_param("isFlexibleRate", self.flexible_rate_flag());
        Ok(request)
    }

    fn flexible_rate_flag(&self) -> Option<bool> {
        self.is_flexible_rate.or(self.loan_term.map(|_| false))
    }

    /// Sends the request.
    #[instrument(skip(self), name = "vip_loan_borrow")]
    pub async fn send(&self) -> Result<VipLoanBorrowResponse> {
        let request = self.build_request()?;
        dispatch(self.client, &request).await
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VipLoanBorrowResponse {
    pub loan_account_id: String,
    pub request_id: String,
    pub loan_coin: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub loan_amount: Decimal,
    pub collateral_account_id: String,
    pub collateral_coin: String,
    /// Empty for flexible-rate loans
    #[serde(default)]
    pub loan_term: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::MockApiClient;
    use crate::vip_loan::test_support::{expect_request, never_called};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_borrow() {
        let client = expect_request(
            Method::POST,
            ENDPOINT,
            &[
                ("loanAccountId", "12345678"),
                ("loanCoin", "BUSD"),
                ("loanAmount", "100.55"),
                ("collateralAccountId", "12345678,12345679"),
                ("collateralCoin", "BNB,BTC"),
                ("loanTerm", "30"),
                ("isFlexibleRate", "false"),
            ],
            r#"{
                "loanAccountId": "12345678",
                "requestId": "12345678",
                "loanCoin": "BUSD",
                "loanAmount": "100.55",
                "collateralAccountId": "12345678,12345679",
                "collateralCoin": "BNB,BTC",
                "loanTerm": "30"
            }"#,
        );

        let res = VipLoanBorrowService::new(&client)
            .loan_account_id("12345678")
            .loan_coin("BUSD")
            .loan_amount(dec!(100.55))
            .collateral_account_id("12345678")
            .collateral_account_id("12345679")
            .collateral_coin("BNB")
            .collateral_coin("BTC")
            .loan_term(30)
            .send()
            .await
            .unwrap();

        assert_eq!(
            res,
            VipLoanBorrowResponse {
                loan_account_id: "12345678".to_string(),
                request_id: "12345678".to_string(),
                loan_coin: "BUSD".to_string(),
                loan_amount: dec!(100.55),
                collateral_account_id: "12345678,12345679".to_string(),
                collateral_coin: "BNB,BTC".to_string(),
                loan_term: "30".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_flexible_borrow_without_term() {
        let client = expect_request(
            Method::POST,
            ENDPOINT,
            &[
                ("loanAccountId", "1"),
                ("loanCoin", "USDT"),
                ("loanAmount", "5000"),
                ("collateralAccountId", "2"),
                ("collateralCoin", "ETH"),
                ("isFlexibleRate", "true"),
            ],
            r#"{
                "loanAccountId": "1",
                "requestId": "99",
                "loanCoin": "USDT",
                "loanAmount": "5000",
                "collateralAccountId": "2",
                "collateralCoin": "ETH"
            }"#,
        );

        let res = VipLoanBorrowService::new(&client)
            .loan_account_id("1")
            .loan_coin("USDT")
            .loan_amount(dec!(5000))
            .collateral_account_id("2")
            .collateral_coin("ETH")
            .is_flexible_rate(true)
            .send()
            .await
            .unwrap();

        assert_eq!(res.request_id, "99");
        assert!(res.loan_term.is_empty());
    }

    #[tokio::test]
    async fn test_borrow_requires_collateral() {
        let client = never_called();

        let err = VipLoanBorrowService::new(&client)
            .loan_account_id("1")
            .loan_coin("USDT")
            .loan_amount(dec!(1))
            .collateral_coin("BTC")
            .send()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::MissingParameter("collateralAccountId")));
    }

    #[tokio::test]
    async fn test_borrow_requires_loan_coin() {
        let client = never_called();

        let err = VipLoanBorrowService::new(&client)
            .loan_account_id("1")
            .loan_amount(dec!(1))
            .collateral_account_id("2")
            .collateral_coin("BTC")
            .send()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::MissingParameter("loanCoin")));
    }

    fn complete(client: &MockApiClient) -> VipLoanBorrowService<'_> {
        VipLoanBorrowService::new(client)
            .loan_account_id("1")
            .loan_coin("USDT")
            .loan_amount(dec!(1))
            .collateral_account_id("2")
            .collateral_coin("BTC")
    }

    #[test]
    fn test_term_without_flag_is_fixed_rate() {
        let client = never_called();
        let request = complete(&client).loan_term(60).build_request().unwrap();

        assert_eq!(request.param("loanTerm"), Some("60"));
        assert_eq!(request.param("isFlexibleRate"), Some("false"));
    }

    #[test]
    fn test_explicit_flag_wins_over_term() {
        let client = never_called();
        let request = complete(&client)
            .loan_term(30)
            .is_flexible_rate(true)
            .build_request()
            .unwrap();

        assert_eq!(request.param("isFlexibleRate"), Some("true"));
    }

    #[test]
    fn test_no_term_no_flag_sends_neither() {
        let client = never_called();
        let request = complete(&client).build_request().unwrap();

        assert_eq!(request.param("loanTerm"), None);
        assert_eq!(request.param("isFlexibleRate"), None);
    }

    #[tokio::test]
    async fn test_borrow_requires_collateral_coin() {
        let client = never_called();

        let err = VipLoanBorrowService::new(&client)
            .loan_account_id("1")
            .loan_coin("USDT")
            .loan_amount(dec!(1))
            .collateral_account_id("2")
            .send()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::MissingParameter("collateralCoin")));
    }

    #[tokio::test]
    async fn test_borrow_requires_loan_account_id() {
        let client = never_called();

        let err = VipLoanBorrowService::new(&client)
            .loan_coin("USDT")
            .loan_amount(dec!(1))
            .collateral_account_id("2")
            .collateral_coin("BTC")
            .send()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::MissingParameter("loanAccountId")));
    }

    #[tokio::test]
    async fn test_borrow_requires_loan_amount() {
        let client = never_called();

        let err = VipLoanBorrowService::new(&client)
            .loan_account_id("1")
            .loan_coin("USDT")
            .collateral_account_id("2")
            .collateral_coin("BTC")
            .send()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::MissingParameter("loanAmount")));
    }
}
