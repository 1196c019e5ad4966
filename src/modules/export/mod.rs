//! Export Module
//!
//! Writes fetched pair history and trending pools to timestamped CSV/JSON
//! files in the user data directory.

mod csv_export;
mod json_export;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use directories::ProjectDirs;

use crate::domain::pool::{PairHistory, TrendingPool};

/// Get the export directory path, creating it if needed
fn export_dir() -> std::io::Result<PathBuf> {
    let dir = ProjectDirs::from("io", "pairlens", "pairlens")
        .map(|dirs| dirs.data_dir().join("exports"))
        .unwrap_or_else(|| PathBuf::from(".pairlens").join("exports"));
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Generate a timestamped filename
fn generate_filename(prefix: &str, extension: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d-%H%M%S");
    format!("{}-{}.{}", prefix, timestamp, extension)
}

/// Export pair history as CSV; returns the written path.
pub fn export_history_csv(history: &PairHistory) -> Result<PathBuf> {
    let dir = export_dir().context("create export directory")?;
    let path = dir.join(generate_filename("history", "csv"));
    csv_export::write_day_data(&path, &history.days)
        .map_err(|err| anyhow::anyhow!("export failed: {err}"))?;
    Ok(path)
}

/// Export pair history as JSON; returns the written path.
pub fn export_history_json(history: &PairHistory) -> Result<PathBuf> {
    let dir = export_dir().context("create export directory")?;
    let path = dir.join(generate_filename("history", "json"));
    json_export::write_history(&path, history)
        .map_err(|err| anyhow::anyhow!("export failed: {err}"))?;
    Ok(path)
}

/// Export trending pools as CSV; returns the written path.
pub fn export_trending_csv(pools: &[TrendingPool]) -> Result<PathBuf> {
    let dir = export_dir().context("create export directory")?;
    let path = dir.join(generate_filename("trending", "csv"));
    csv_export::write_trending(&path, pools)
        .map_err(|err| anyhow::anyhow!("export failed: {err}"))?;
    Ok(path)
}

/// Export trending pools as JSON; returns the written path.
pub fn export_trending_json(pools: &[TrendingPool]) -> Result<PathBuf> {
    let dir = export_dir().context("create export directory")?;
    let path = dir.join(generate_filename("trending", "json"));
    json_export::write_trending(&path, pools)
        .map_err(|err| anyhow::anyhow!("export failed: {err}"))?;
    Ok(path)
}
