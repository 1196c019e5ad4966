//! CSV Export
//!
//! Writes pair day data and trending pools to CSV files.

use std::path::Path;

use crate::domain::pool::{PairDayData, TrendingPool};

/// Write pair day data rows to a CSV file
pub fn write_day_data(path: &Path, days: &[PairDayData]) -> Result<usize, Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_path(path)?;

    // Write header
    wtr.write_record(["date", "volume_usd", "volume_token0", "volume_token1", "tvl_usd"])?;

    // Write data rows
    for day in days {
        wtr.write_record([
            day.date.clone(),
            day.volume_usd.clone(),
            day.volume_token0.clone(),
            day.volume_token1.clone(),
            day.tvl_usd.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(days.len())
}

/// Write trending pools to a CSV file
pub fn write_trending(path: &Path, pools: &[TrendingPool]) -> Result<usize, Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_path(path)?;

    // Write header
    wtr.write_record([
        "network",
        "dex",
        "name",
        "address",
        "base_symbol",
        "quote_symbol",
        "volume_usd_24h",
        "price_change_24h",
        "reserve_usd",
        "buys_24h",
        "sells_24h",
    ])?;

    // Write data rows
    for pool in pools {
        wtr.write_record([
            pool.network.clone(),
            pool.dex.clone(),
            pool.name.clone(),
            pool.address.clone(),
            pool.base_token.symbol.clone(),
            pool.quote_token.symbol.clone(),
            pool.volume_usd_24h.clone(),
            pool.price_change_percentage_24h.clone(),
            pool.reserve_in_usd.clone(),
            pool.transactions_24h.buys.to_string(),
            pool.transactions_24h.sells.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(pools.len())
}
