//! Binance REST API client.

use crate::config::BinanceConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::Deserialize;
use sha2::Sha256;
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::request::{encode_params, Request, SecType};
use super::traits::ApiClient;

pub const SPOT_BASE_URL: &str = "https://api.binance.com";

const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Error body Binance returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorPayload {
    code: i64,
    msg: String,
}

/// Binance API client for the `/sapi` surface.
pub struct BinanceClient {
    http: Client,
    api_key: String,
    secret_key: String,
    base_url: String,
    recv_window: Option<u64>,
}

impl BinanceClient {
    /// Create a new Binance client from configuration.
    pub fn new(config: &BinanceConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            secret_key: config.secret_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            recv_window: (config.recv_window > 0).then_some(config.recv_window),
        })
    }

    /// Point the client at a different host, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate HMAC-SHA256 signature for authenticated requests.
    pub fn sign(&self, payload: &str) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret_key.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Get current timestamp in milliseconds.
    fn timestamp() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    /// Final query string for a request, including `timestamp`, `recvWindow`
    /// and `signature` when the endpoint is signed. The signature is always
    /// the last parameter.
    fn build_query(&self, request: &Request) -> String {
        if request.sec_type() != SecType::Signed {
            return request.query_string();
        }

        let mut params = request.params().to_vec();
        if let Some(recv_window) = self.recv_window {
            params.push(("recvWindow".to_string(), recv_window.to_string()));
        }
        params.push(("timestamp".to_string(), Self::timestamp().to_string()));

        let query = encode_params(&params);
        let signature = self.sign(&query);
        format!("{}&signature={}", query, signature)
    }
}

impl fmt::Debug for BinanceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinanceClient")
            .field("base_url", &self.base_url)
            .field("recv_window", &self.recv_window)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ApiClient for BinanceClient {
    #[instrument(skip(self, request), fields(method = %request.method(), endpoint = request.endpoint()))]
    async fn call_api(&self, request: &Request) -> Result<Vec<u8>> {
        let query = self.build_query(request);
        let url = if query.is_empty() {
            format!("{}{}", self.base_url, request.endpoint())
        } else {
            format!("{}{}?{}", self.base_url, request.endpoint(), query)
        };

        let mut builder = self.http.request(request.method().clone(), &url);
        if request.sec_type() != SecType::None {
            builder = builder.header(API_KEY_HEADER, &self.api_key);
        }

        debug!("Sending {} parameter(s)", request.params().len());

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(decode_error(status.as_u16(), &body));
        }

        Ok(body.to_vec())
    }
}

fn decode_error(status: u16, body: &[u8]) -> Error {
    match serde_json::from_slice::<ApiErrorPayload>(body) {
        Ok(payload) => {
            warn!(status, code = payload.code, "Binance rejected request: {}", payload.msg);
            Error::Api {
                status,
                code: payload.code,
                msg: payload.msg,
            }
        }
        Err(_) => Error::Status {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    fn client_with_secret(secret: &str) -> BinanceClient {
        let config = BinanceConfig {
            api_key: "key".to_string(),
            secret_key: secret.to_string(),
            ..BinanceConfig::default()
        };
        BinanceClient::new(&config).unwrap()
    }

    #[test]
    fn test_sign_matches_binance_reference() {
        // Example from the Binance API documentation on SIGNED endpoints.
        let client = client_with_secret(
            "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j",
        );
        let payload = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";

        assert_eq!(
            client.sign(payload),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn test_signed_query_appends_auth_params() {
        let client = client_with_secret("secret");
        let mut request = Request::signed(Method::POST, "/sapi/v1/loan/vip/repay");
        request.set_param("orderId", 1).set_param("amount", "100");

        let query = client.build_query(&request);
        let (unsigned, signature) = query.rsplit_once("&signature=").unwrap();

        assert!(unsigned.starts_with("orderId=1&amount=100&recvWindow=5000&timestamp="));
        assert_eq!(signature, client.sign(unsigned));
    }

    #[test]
    fn test_unsigned_query_is_untouched() {
        let client = client_with_secret("secret");
        let mut request = Request::new(Method::GET, "/sapi/v1/ping", SecType::None);
        request.set_param("foo", "bar");

        assert_eq!(client.build_query(&request), "foo=bar");
    }

    #[test]
    fn test_zero_recv_window_is_omitted() {
        let config = BinanceConfig {
            recv_window: 0,
            ..BinanceConfig::default()
        };
        let client = BinanceClient::new(&config).unwrap();
        let request = Request::signed(Method::GET, "/sapi/v1/loan/vip/loanable/data");

        assert!(!client.build_query(&request).contains("recvWindow"));
    }

    #[test]
    fn test_decode_error_payload() {
        let err = decode_error(400, br#"{"code":-1102,"msg":"Mandatory parameter 'orderId' was not sent."}"#);
        assert_eq!(err.api_code(), Some(-1102));

        let err = decode_error(502, b"<html>Bad Gateway</html>");
        assert!(matches!(err, Error::Status { status: 502, .. }));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let client = client_with_secret("super-secret");
        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains(SPOT_BASE_URL));
    }
}
