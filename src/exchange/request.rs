//! Request description handed from services to the API client.

use reqwest::Method;

/// Security class of a Binance endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecType {
    /// Public endpoint, no credentials.
    None,
    /// Requires the `X-MBX-APIKEY` header only.
    ApiKey,
    /// Requires the API key header plus `timestamp` and HMAC `signature`.
    Signed,
}

/// A single REST call: method, path, security class and ordered parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    endpoint: &'static str,
    sec_type: SecType,
    params: Vec<(String, String)>,
}

impl Request {
    pub fn new(method: Method, endpoint: &'static str, sec_type: SecType) -> Self {
        Self {
            method,
            endpoint,
            sec_type,
            params: Vec::new(),
        }
    }

    /// Shorthand for a `SIGNED` endpoint.
    pub fn signed(method: Method, endpoint: &'static str) -> Self {
        Self::new(method, endpoint, SecType::Signed)
    }

    /// Set a parameter, replacing any earlier value under the same key.
    /// Replaced keys keep their original position.
    pub fn set_param(&mut self, key: &str, value: impl ToString) -> &mut Self {
        let value = value.to_string();
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.params.push((key.to_string(), value)),
        }
        self
    }

    /// Set a parameter only when a value is present.
    pub fn set_optional_param<T: ToString>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.set_param(key, value);
        }
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    pub fn sec_type(&self) -> SecType {
        self.sec_type
    }

    /// URL-encoded `key=value&...` in insertion order.
    pub fn query_string(&self) -> String {
        encode_params(&self.params)
    }
}

pub(crate) fn encode_params(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_param_replaces_in_place() {
        let mut request = Request::signed(Method::GET, "/sapi/v1/loan/vip/ongoing/orders");
        request
            .set_param("loanCoin", "USDT")
            .set_param("limit", 10)
            .set_param("loanCoin", "BUSD");

        assert_eq!(request.query_string(), "loanCoin=BUSD&limit=10");
        assert_eq!(request.param("loanCoin"), Some("BUSD"));
    }

    #[test]
    fn test_optional_param_skips_none() {
        let mut request = Request::signed(Method::GET, "/sapi/v1/loan/vip/loanable/data");
        request
            .set_optional_param("loanCoin", None::<String>)
            .set_optional_param("vipLevel", Some(1));

        assert_eq!(request.params().len(), 1);
        assert_eq!(request.param("loanCoin"), None);
        assert_eq!(request.param("vipLevel"), Some("1"));
    }

    #[test]
    fn test_query_string_encodes_values() {
        let mut request = Request::signed(Method::POST, "/sapi/v1/loan/vip/borrow");
        request.set_param("collateralCoin", "BNB,BTC");

        assert_eq!(request.query_string(), "collateralCoin=BNB%2CBTC");
    }
}
