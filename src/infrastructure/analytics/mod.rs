//! Trending pools via the onchain analytics API

mod client;

pub use client::AnalyticsClient;
