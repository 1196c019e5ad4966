//! JSON Export
//!
//! Writes pair history and trending pools to pretty-printed JSON files.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::pool::{PairHistory, TrendingPool};

/// Write a full pair history (pair info + day rows) to a JSON file
pub fn write_history(path: &Path, history: &PairHistory) -> Result<usize, Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(history)?;

    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;

    Ok(history.days.len())
}

/// Write trending pools to a JSON file
pub fn write_trending(path: &Path, pools: &[TrendingPool]) -> Result<usize, Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(pools)?;

    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;

    Ok(pools.len())
}
