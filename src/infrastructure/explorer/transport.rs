//! eth_call transport abstraction

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::abi::RawWord;

/// Failure of a single proxied read call.
///
/// Rate limiting gets its own variant because the caller may want to back
/// off rather than treat it like any other upstream fault.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("rate limit reached, wait a moment and try again")]
    RateLimited,
    #[error("call returned no data")]
    EmptyResult,
    #[error("upstream error: {0}")]
    Upstream(String),
    #[error("transport error: {0}")]
    Transport(String),
}

/// Read-only contract call collaborator.
///
/// One call per no-argument read function, identified by its 4-byte
/// selector. Implementations own their own timeout policy.
#[async_trait]
pub trait EthCallTransport: Send + Sync {
    async fn eth_call(&self, to: &str, selector: &str) -> Result<RawWord, CallError>;
}
