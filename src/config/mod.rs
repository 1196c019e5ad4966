use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_EXPLORER_URL: &str = "https://api.etherscan.io/v2/api";
pub const DEFAULT_ANALYTICS_URL: &str = "https://pro-api.coingecko.com/api/v3/onchain";
pub const DEFAULT_NETWORK: &str = "mainnet";
pub const DEFAULT_CHAIN_ID: u64 = 1;

/// One queryable network: where its explorer proxy lives, which chain id it
/// answers for, and where its pair subgraph is.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    pub name: String,
    pub chain_id: u64,
    pub explorer_url: Option<String>,
    pub subgraph_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub networks: Vec<NetworkConfig>,

    #[serde(default)]
    pub analytics_url: Option<String>,

    #[serde(default)]
    pub etherscan_api_key: Option<String>,

    #[serde(default)]
    pub analytics_api_key: Option<String>,
}

impl NetworkConfig {
    pub fn explorer_url(&self) -> &str {
        self.explorer_url.as_deref().unwrap_or(DEFAULT_EXPLORER_URL)
    }
}

impl Config {
    /// Look up a network by name. An unconfigured "mainnet" always exists
    /// with the default explorer endpoint.
    pub fn network(&self, name: &str) -> Option<NetworkConfig> {
        if let Some(found) = self.networks.iter().find(|n| n.name == name) {
            return Some(found.clone());
        }
        if name == DEFAULT_NETWORK {
            return Some(NetworkConfig {
                name: DEFAULT_NETWORK.to_string(),
                chain_id: DEFAULT_CHAIN_ID,
                explorer_url: None,
                subgraph_url: None,
            });
        }
        None
    }

    pub fn analytics_url(&self) -> &str {
        self.analytics_url.as_deref().unwrap_or(DEFAULT_ANALYTICS_URL)
    }
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    toml::from_str::<Config>(&content).unwrap_or_default()
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("PAIRLENS_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("pairlens").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("pairlens").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "pairlens", "pairlens")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("pairlens"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("pairlens"));
    }
    directories::ProjectDirs::from("io", "pairlens", "pairlens")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn credentials_db_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("credentials.sqlite3"))
}
