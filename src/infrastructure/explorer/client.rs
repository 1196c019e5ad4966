//! Explorer V2 proxy client

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::transport::{CallError, EthCallTransport};
use crate::domain::abi::RawWord;

/// JSON envelope returned by the explorer proxy.
///
/// V2 deployments answer in JSON-RPC shape (`jsonrpc`/`result`); older ones
/// answer with `status`/`message`/`result`. Both shapes are modeled here and
/// collapsed into a tagged outcome before anything downstream runs, so no
/// untyped JSON escapes this module.
#[derive(Debug, Deserialize)]
struct ProxyEnvelope {
    #[serde(default)]
    jsonrpc: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    // A string payload on success; JSON-RPC puts an object here on error.
    #[serde(default)]
    result: Option<serde_json::Value>,
}

impl ProxyEnvelope {
    fn classify(self) -> Result<RawWord, CallError> {
        let payload = self.result.as_ref().and_then(|v| v.as_str());

        let accepted = match payload {
            Some(p) if p != "0x" => {
                self.jsonrpc.as_deref() == Some("2.0") || self.status.as_deref() == Some("1")
            }
            _ => false,
        };
        if accepted {
            return Ok(RawWord::new(payload.unwrap_or_default()));
        }

        if let Some(message) = &self.message {
            if message.contains("rate limit") {
                return Err(CallError::RateLimited);
            }
        }
        if payload == Some("0x") {
            return Err(CallError::EmptyResult);
        }

        let detail = self
            .message
            .or_else(|| self.result.map(|v| v.to_string()))
            .unwrap_or_else(|| "unknown error".to_string());
        Err(CallError::Upstream(detail))
    }
}

/// Explorer proxy eth_call client.
///
/// Base URL, chain id, and API key are explicit construction parameters;
/// nothing here is process-global, so lookups against different chains can
/// run side by side.
pub struct EtherscanClient {
    http: reqwest::Client,
    base_url: String,
    chain_id: u64,
    api_key: String,
}

impl EtherscanClient {
    pub fn new(base_url: impl Into<String>, chain_id: u64, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into(),
            chain_id,
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl EthCallTransport for EtherscanClient {
    async fn eth_call(&self, to: &str, selector: &str) -> Result<RawWord, CallError> {
        let chain_id = self.chain_id.to_string();
        let params = [
            ("chainid", chain_id.as_str()),
            ("module", "proxy"),
            ("action", "eth_call"),
            ("to", to),
            ("data", selector),
            ("tag", "latest"),
            ("apikey", self.api_key.as_str()),
        ];

        tracing::debug!(to, selector, chain_id = self.chain_id, "explorer eth_call");

        let response = self
            .http
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|err| CallError::Transport(err.to_string()))?;

        let envelope: ProxyEnvelope = response
            .json()
            .await
            .map_err(|err| CallError::Transport(err.to_string()))?;

        envelope.classify()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(body: &str) -> Result<RawWord, CallError> {
        let envelope: ProxyEnvelope = serde_json::from_str(body).expect("valid json");
        envelope.classify()
    }

    #[test]
    fn test_v2_jsonrpc_success() {
        let word = classify(r#"{"jsonrpc":"2.0","id":1,"result":"0x0000bb8"}"#).unwrap();
        assert_eq!(word.as_str(), "0x0000bb8");
    }

    #[test]
    fn test_legacy_status_success() {
        let word = classify(r#"{"status":"1","message":"OK","result":"0xff"}"#).unwrap();
        assert_eq!(word.as_str(), "0xff");
    }

    #[test]
    fn test_empty_result_is_distinct() {
        let err = classify(r#"{"jsonrpc":"2.0","id":1,"result":"0x"}"#).unwrap_err();
        assert!(matches!(err, CallError::EmptyResult));
    }

    #[test]
    fn test_rate_limit_recognized_by_message() {
        let err = classify(
            r#"{"status":"0","message":"Max rate limit reached","result":null}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CallError::RateLimited));
    }

    #[test]
    fn test_jsonrpc_error_object() {
        let err = classify(
            r#"{"jsonrpc":"2.0","id":1,"result":{"code":-32000,"message":"execution reverted"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CallError::Upstream(_)));
    }

    #[test]
    fn test_unknown_shape_is_upstream_error() {
        let err = classify(r#"{"status":"0","message":"NOTOK"}"#).unwrap_err();
        match err {
            CallError::Upstream(detail) => assert_eq!(detail, "NOTOK"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
