//! pairlens - DEX trading-pair statistics from explorer, subgraph, and
//! analytics APIs
//!
//! All volume, liquidity, and price figures are computed upstream; this
//! crate reshapes provider responses and decodes raw contract-call return
//! data. The bit-exact part lives in [`domain::abi`].

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod modules;
pub mod store;
