//! GraphQL client for per-pair daily volume and TVL

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::pool::{PairDayData, PairHistory, PairInfo};

/// Thirty most recent days of per-pool volume and TVL, newest first.
const PAIR_DAY_DATA_QUERY: &str = r#"
query GetPairDayData($pairAddress: String!) {
  pool(id: $pairAddress) {
    id
    token0 { symbol name }
    token1 { symbol name }
  }
  poolDayDatas(
    first: 30
    orderBy: date
    orderDirection: desc
    where: { pool: $pairAddress }
  ) {
    date
    volumeUSD
    volumeToken0
    volumeToken1
    tvlUSD
  }
}
"#;

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Variables,
}

#[derive(Debug, Serialize)]
struct Variables {
    #[serde(rename = "pairAddress")]
    pair_address: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<PoolQueryData>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct PoolQueryData {
    pool: Option<PoolEntity>,
    #[serde(rename = "poolDayDatas", default)]
    pool_day_datas: Vec<PoolDayDataRow>,
}

#[derive(Debug, Deserialize)]
struct PoolEntity {
    token0: TokenEntity,
    token1: TokenEntity,
}

#[derive(Debug, Deserialize)]
struct TokenEntity {
    symbol: String,
}

#[derive(Debug, Deserialize)]
struct PoolDayDataRow {
    date: i64,
    #[serde(rename = "volumeUSD")]
    volume_usd: String,
    #[serde(rename = "volumeToken0")]
    volume_token0: String,
    #[serde(rename = "volumeToken1")]
    volume_token1: String,
    #[serde(rename = "tvlUSD")]
    tvl_usd: String,
}

/// GraphQL-over-HTTP client for the pair subgraph.
pub struct SubgraphClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SubgraphClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
            endpoint: endpoint.into(),
        }
    }

    /// Fetch 30 days of volume/TVL for a pair, newest first.
    ///
    /// The subgraph indexes pool ids lowercased, so the address is
    /// normalized before querying.
    pub async fn fetch_pair_history(&self, pair_address: &str) -> Result<PairHistory> {
        let request = GraphQlRequest {
            query: PAIR_DAY_DATA_QUERY,
            variables: Variables {
                pair_address: pair_address.trim().to_lowercase(),
            },
        };

        tracing::debug!(pair = %request.variables.pair_address, "subgraph query");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .context("subgraph request failed")?;

        let body: GraphQlResponse = response
            .json()
            .await
            .context("subgraph response was not valid JSON")?;

        build_history(body)
    }
}

fn build_history(body: GraphQlResponse) -> Result<PairHistory> {
    if let Some(errors) = &body.errors {
        if let Some(first) = errors.first() {
            return Err(anyhow!("subgraph error: {}", first.message));
        }
    }

    let data = body
        .data
        .ok_or_else(|| anyhow!("subgraph response carried no data"))?;
    let pool = data
        .pool
        .ok_or_else(|| anyhow!("pool not found, check the address and try again"))?;
    if data.pool_day_datas.is_empty() {
        return Err(anyhow!("no trading data available for this pool"));
    }

    let days = data
        .pool_day_datas
        .into_iter()
        .map(|day| PairDayData {
            date: format_day(day.date),
            volume_usd: day.volume_usd,
            volume_token0: day.volume_token0,
            volume_token1: day.volume_token1,
            tvl_usd: day.tvl_usd,
        })
        .collect();

    Ok(PairHistory {
        pair: PairInfo {
            token0: pool.token0.symbol,
            token1: pool.token1.symbol,
        },
        days,
    })
}

/// Subgraph dates are unix timestamps at day granularity; render them as
/// short human-readable dates.
fn format_day(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
