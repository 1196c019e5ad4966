//! Explorer-proxied contract reads
//!
//! The explorer's `module=proxy&action=eth_call` endpoint stands in for a
//! direct JSON-RPC connection. The transport trait abstracts it so the read
//! aggregator can be driven by a canned transport in tests.

mod client;
mod reader;
mod transport;

pub use client::EtherscanClient;
pub use reader::PoolReader;
pub use transport::{CallError, EthCallTransport};
