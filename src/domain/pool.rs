//! Pair and pool value types shared across the data sources

use serde::{Deserialize, Serialize};

/// On-chain pool parameters assembled from the six-call read set.
///
/// Numeric fields are decimal strings so arbitrary-precision values
/// (liquidity, sqrt price) survive serialization unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolContractInfo {
    pub fee: String,
    pub fee_percentage: f64,
    pub token0: String,
    pub token1: String,
    pub liquidity: String,
    pub tick_spacing: String,
    pub sqrt_price_x96: String,
}

/// One day of subgraph volume/TVL data for a pair.
#[derive(Debug, Clone, Serialize)]
pub struct PairDayData {
    pub date: String,
    pub volume_usd: String,
    pub volume_token0: String,
    pub volume_token1: String,
    pub tvl_usd: String,
}

/// Token symbols of the pair, for table headers.
#[derive(Debug, Clone, Serialize)]
pub struct PairInfo {
    pub token0: String,
    pub token1: String,
}

/// Thirty days of pair history, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct PairHistory {
    pub pair: PairInfo,
    pub days: Vec<PairDayData>,
}

/// One row from the analytics trending feed.
#[derive(Debug, Clone, Serialize)]
pub struct TrendingPool {
    pub id: String,
    pub address: String,
    pub name: String,
    pub network: String,
    pub dex: String,
    /// Original DEX id, kept for supported-pool filtering.
    pub dex_id: String,
    pub base_token: TokenSummary,
    pub quote_token: TokenSummary,
    pub base_token_price_usd: String,
    pub quote_token_price_usd: String,
    pub volume_usd_24h: String,
    pub price_change_percentage_24h: String,
    pub reserve_in_usd: String,
    pub transactions_24h: TxTally,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TokenSummary {
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub image_url: String,
}

/// 24h transaction counts for a trending pool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TxTally {
    #[serde(default)]
    pub buys: u64,
    #[serde(default)]
    pub sells: u64,
    #[serde(default)]
    pub buyers: u64,
    #[serde(default)]
    pub sellers: u64,
}
