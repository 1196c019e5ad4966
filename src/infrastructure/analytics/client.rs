//! Trending-pools REST client
//!
//! The analytics API speaks JSON:API: pool rows reference tokens, DEXes,
//! and networks by id, with the referenced resources carried in a flat
//! `included` array. Everything is deserialized into typed structs and the
//! references joined before any row leaves this module.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::domain::pool::{TokenSummary, TrendingPool, TxTally};

/// Network + DEX combinations the dashboard has subgraphs for. The trending
/// feed has no server-side network filter, so rows are filtered down to
/// these client-side.
const SUPPORTED_POOLS: &[(&str, &str)] = &[
    ("eth", "uniswap_v3"),
    ("eth", "uniswap_v2"),
    ("base", "uniswap_v3"),
    ("gno", "sushiswap_v3"),
];

const NETWORKS: &[&str] = &["eth", "base", "gno"];
const CHECKS: &[&str] = &["no_honeypot"];
const INCLUDE: &[&str] = &["base_token", "quote_token", "dex", "network"];
const SORT: &str = "h24_volume_usd_desc";

/// Pagination bounds for the unfiltered trending feed.
const MAX_PAGES: usize = 15;
const MIN_SUPPORTED_POOLS: usize = 20;
const INTER_PAGE_DELAY: Duration = Duration::from_millis(100);

fn is_supported_pool(network: &str, dex_id: &str) -> bool {
    SUPPORTED_POOLS
        .iter()
        .any(|(n, d)| *n == network && *d == dex_id)
}

#[derive(Debug, Deserialize)]
struct PoolsResponse {
    #[serde(default)]
    data: Vec<PoolResource>,
    #[serde(default)]
    included: Vec<IncludedResource>,
}

#[derive(Debug, Deserialize)]
struct PoolResource {
    id: String,
    attributes: PoolAttributes,
    #[serde(default)]
    relationships: Relationships,
}

#[derive(Debug, Default, Deserialize)]
struct PoolAttributes {
    #[serde(default)]
    address: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    base_token_price_usd: String,
    #[serde(default)]
    quote_token_price_usd: String,
    #[serde(default)]
    volume_usd: PeriodValues,
    #[serde(default)]
    price_change_percentage: PeriodValues,
    #[serde(default)]
    reserve_in_usd: String,
    #[serde(default)]
    transactions: TxPeriods,
}

#[derive(Debug, Default, Deserialize)]
struct PeriodValues {
    #[serde(default)]
    h24: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TxPeriods {
    #[serde(default)]
    h24: Option<TxTally>,
}

#[derive(Debug, Default, Deserialize)]
struct Relationships {
    #[serde(default)]
    base_token: Option<RelRef>,
    #[serde(default)]
    quote_token: Option<RelRef>,
    #[serde(default)]
    dex: Option<RelRef>,
}

#[derive(Debug, Deserialize)]
struct RelRef {
    data: Option<RelData>,
}

#[derive(Debug, Deserialize)]
struct RelData {
    id: String,
}

#[derive(Debug, Deserialize)]
struct IncludedResource {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    attributes: IncludedAttributes,
}

#[derive(Debug, Default, Deserialize)]
struct IncludedAttributes {
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
}

/// Trending-pools client. Base URL and API key are explicit construction
/// parameters.
pub struct AnalyticsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AnalyticsClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Walk the trending feed page by page until enough supported pools
    /// have been collected (or the feed runs dry).
    pub async fn fetch_trending(&self) -> Result<Vec<TrendingPool>> {
        if self.api_key.is_empty() {
            bail!("analytics API key is required");
        }

        let include = INCLUDE.join(",");
        let mut supported: Vec<TrendingPool> = Vec::new();

        for page in 1..=MAX_PAGES {
            tracing::debug!(page, "fetching trending pools page");

            let page_param = page.to_string();
            let url = format!("{}/networks/trending_pools", self.base_url);
            let body = self
                .fetch_page(&url, &[("include", include.as_str()), ("page", &page_param)])
                .await?;

            let page_size = body.data.len();
            let page_pools = build_pools(body, true);
            tracing::debug!(
                page,
                found = page_pools.len(),
                total = supported.len() + page_pools.len(),
                "supported pools so far"
            );
            supported.extend(page_pools);

            if supported.len() >= MIN_SUPPORTED_POOLS || page_size == 0 {
                break;
            }
            tokio::time::sleep(INTER_PAGE_DELAY).await;
        }

        Ok(supported)
    }

    /// Single-request variant against the megafilter endpoint, which does
    /// the network/check filtering server-side. Requires a higher plan tier.
    pub async fn fetch_megafilter(&self) -> Result<Vec<TrendingPool>> {
        if self.api_key.is_empty() {
            bail!("analytics API key is required");
        }

        let include = INCLUDE.join(",");
        let networks = NETWORKS.join(",");
        let checks = CHECKS.join(",");
        let url = format!("{}/pools/megafilter", self.base_url);
        let body = self
            .fetch_page(
                &url,
                &[
                    ("include", include.as_str()),
                    ("page", "1"),
                    ("networks", networks.as_str()),
                    ("checks", checks.as_str()),
                    ("sort", SORT),
                ],
            )
            .await?;

        Ok(build_pools(body, false))
    }

    async fn fetch_page(&self, url: &str, params: &[(&str, &str)]) -> Result<PoolsResponse> {
        let response = self
            .http
            .get(url)
            .query(params)
            .header("x-cg-pro-api-key", &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .context("analytics request failed")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            bail!("analytics API error: {status} - {detail}");
        }

        response
            .json()
            .await
            .context("analytics response was not valid JSON")
    }
}

/// Join pool rows against the included token/dex resources and, when asked,
/// drop rows from unsupported network/DEX combinations.
fn build_pools(body: PoolsResponse, filter_supported: bool) -> Vec<TrendingPool> {
    let mut tokens: HashMap<String, IncludedAttributes> = HashMap::new();
    let mut dexes: HashMap<String, IncludedAttributes> = HashMap::new();
    for item in body.included {
        match item.kind.as_str() {
            "token" => {
                tokens.insert(item.id, item.attributes);
            }
            "dex" => {
                dexes.insert(item.id, item.attributes);
            }
            _ => {}
        }
    }

    body.data
        .into_iter()
        .map(|pool| {
            // Pool ids are "<network>_<address>".
            let network = pool.id.split('_').next().unwrap_or_default().to_string();
            let dex_id = rel_id(&pool.relationships.dex);
            let dex = dexes
                .get(&dex_id)
                .and_then(|d| d.name.clone())
                .unwrap_or_else(|| {
                    if dex_id.is_empty() {
                        "unknown".to_string()
                    } else {
                        dex_id.clone()
                    }
                });

            let attrs = pool.attributes;
            TrendingPool {
                base_token: token_summary(&tokens, &rel_id(&pool.relationships.base_token)),
                quote_token: token_summary(&tokens, &rel_id(&pool.relationships.quote_token)),
                id: pool.id,
                address: attrs.address,
                name: attrs.name,
                network,
                dex,
                dex_id,
                base_token_price_usd: attrs.base_token_price_usd,
                quote_token_price_usd: attrs.quote_token_price_usd,
                volume_usd_24h: attrs.volume_usd.h24.unwrap_or_else(|| "0".to_string()),
                price_change_percentage_24h: attrs
                    .price_change_percentage
                    .h24
                    .unwrap_or_else(|| "0".to_string()),
                reserve_in_usd: if attrs.reserve_in_usd.is_empty() {
                    "0".to_string()
                } else {
                    attrs.reserve_in_usd
                },
                transactions_24h: attrs.transactions.h24.unwrap_or_default(),
            }
        })
        .filter(|pool| !filter_supported || is_supported_pool(&pool.network, &pool.dex_id))
        .collect()
}

fn rel_id(rel: &Option<RelRef>) -> String {
    rel.as_ref()
        .and_then(|r| r.data.as_ref())
        .map(|d| d.id.clone())
        .unwrap_or_default()
}

fn token_summary(tokens: &HashMap<String, IncludedAttributes>, id: &str) -> TokenSummary {
    let attrs = tokens.get(id);
    TokenSummary {
        address: attrs.and_then(|a| a.address.clone()).unwrap_or_default(),
        name: attrs
            .and_then(|a| a.name.clone())
            .unwrap_or_else(|| "Unknown".to_string()),
        symbol: attrs
            .and_then(|a| a.symbol.clone())
            .unwrap_or_else(|| "???".to_string()),
        image_url: attrs.and_then(|a| a.image_url.clone()).unwrap_or_default(),
    }
}
