//! Pair day data via the indexing subgraph

mod client;

pub use client::SubgraphClient;
