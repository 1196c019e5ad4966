use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};

use pairlens::config::{self, Config, NetworkConfig};
use pairlens::domain::pool::{PairHistory, PoolContractInfo, TrendingPool};
use pairlens::infrastructure::analytics::AnalyticsClient;
use pairlens::infrastructure::explorer::{EtherscanClient, PoolReader};
use pairlens::infrastructure::subgraph::SubgraphClient;
use pairlens::modules::export;
use pairlens::store::CredentialStore;

#[derive(Debug, Parser)]
#[command(
    name = "pairlens",
    version,
    about = "DEX trading-pair statistics from explorer, subgraph, and analytics APIs"
)]
struct Args {
    /// Log filter (RUST_LOG overrides this)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// On-chain pool parameters via the explorer eth_call proxy
    Pool {
        /// Pool contract address (0x-prefixed)
        address: String,

        /// Network name from config
        #[arg(long, default_value = config::DEFAULT_NETWORK)]
        network: String,
    },
    /// 30-day volume/TVL history via the pair subgraph
    History {
        /// Pool contract address (0x-prefixed)
        address: String,

        /// Network name from config
        #[arg(long, default_value = config::DEFAULT_NETWORK)]
        network: String,

        /// Also write the table to a CSV file
        #[arg(long)]
        csv: bool,

        /// Also write the table to a JSON file
        #[arg(long)]
        json: bool,
    },
    /// Trending pools via the analytics API
    Trending {
        /// Use the megafilter endpoint (higher plan tier)
        #[arg(long)]
        megafilter: bool,

        /// Also write the table to a CSV file
        #[arg(long)]
        csv: bool,

        /// Also write the table to a JSON file
        #[arg(long)]
        json: bool,
    },
    /// Manage stored API credentials
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(Debug, Subcommand)]
enum KeyAction {
    /// Store a secret for a service (e.g. etherscan, analytics)
    Set { service: String, secret: String },
    /// Print the stored secret for a service
    Get { service: String },
    /// Delete the stored secret for a service
    Remove { service: String },
    /// List services with stored secrets
    List,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .init();

    let config = config::load();
    let runtime = tokio::runtime::Runtime::new()?;

    match args.command {
        Command::Pool { address, network } => {
            validate_address(&address)?;
            let net = resolve_network(&config, &network)?;
            let api_key = resolve_key("ETHERSCAN_API_KEY", "etherscan", config.etherscan_api_key.as_deref());
            let client = EtherscanClient::new(net.explorer_url(), net.chain_id, api_key);
            let reader = PoolReader::new(Arc::new(client));
            let info = runtime.block_on(reader.fetch_pool_info(&address))?;
            print_pool_info(&address, &info);
        }

        Command::History {
            address,
            network,
            csv,
            json,
        } => {
            validate_address(&address)?;
            let net = resolve_network(&config, &network)?;
            let endpoint = net
                .subgraph_url
                .clone()
                .or_else(|| std::env::var("PAIRLENS_SUBGRAPH_URL").ok())
                .ok_or_else(|| {
                    anyhow!("no subgraph URL configured for network '{}'", net.name)
                })?;
            let client = SubgraphClient::new(endpoint);
            let history = runtime.block_on(client.fetch_pair_history(&address))?;
            print_history(&history);
            if csv {
                let path = export::export_history_csv(&history)?;
                println!("wrote {}", path.display());
            }
            if json {
                let path = export::export_history_json(&history)?;
                println!("wrote {}", path.display());
            }
        }

        Command::Trending {
            megafilter,
            csv,
            json,
        } => {
            let api_key = resolve_key("ANALYTICS_API_KEY", "analytics", config.analytics_api_key.as_deref());
            let client = AnalyticsClient::new(config.analytics_url(), api_key);
            let pools = if megafilter {
                runtime.block_on(client.fetch_megafilter())?
            } else {
                runtime.block_on(client.fetch_trending())?
            };
            print_trending(&pools);
            if csv {
                let path = export::export_trending_csv(&pools)?;
                println!("wrote {}", path.display());
            }
            if json {
                let path = export::export_trending_json(&pools)?;
                println!("wrote {}", path.display());
            }
        }

        Command::Key { action } => {
            let path = config::credentials_db_path()
                .ok_or_else(|| anyhow!("no usable data directory"))?;
            let store = CredentialStore::open(&path).context("open credential store")?;
            match action {
                KeyAction::Set { service, secret } => {
                    store.set(&service, &secret)?;
                    println!("stored secret for '{service}'");
                }
                KeyAction::Get { service } => match store.get(&service)? {
                    Some(secret) => println!("{secret}"),
                    None => println!("no secret stored for '{service}'"),
                },
                KeyAction::Remove { service } => {
                    store.remove(&service)?;
                    println!("removed secret for '{service}'");
                }
                KeyAction::List => {
                    let services = store.list_services()?;
                    if services.is_empty() {
                        println!("no stored credentials");
                    }
                    for (service, len) in services {
                        println!("{service} ({len} chars)");
                    }
                }
            }
        }
    }

    Ok(())
}

fn validate_address(address: &str) -> Result<()> {
    let body = address.strip_prefix("0x").unwrap_or(address);
    let bytes = hex::decode(body).context("address is not valid hex")?;
    if bytes.len() != 20 {
        bail!("address must be 20 bytes, got {}", bytes.len());
    }
    Ok(())
}

fn resolve_network(config: &Config, name: &str) -> Result<NetworkConfig> {
    config
        .network(name)
        .ok_or_else(|| anyhow!("unknown network '{name}', add it to the config file"))
}

/// API key precedence: environment, then credential store, then config file.
fn resolve_key(env_var: &str, service: &str, config_value: Option<&str>) -> String {
    if let Ok(value) = std::env::var(env_var) {
        if !value.is_empty() {
            return value;
        }
    }
    if let Some(path) = config::credentials_db_path() {
        if let Ok(store) = CredentialStore::open(&path) {
            if let Ok(Some(secret)) = store.get(service) {
                return secret;
            }
        }
    }
    config_value.unwrap_or_default().to_string()
}

fn print_pool_info(address: &str, info: &PoolContractInfo) {
    println!("pool          {address}");
    println!("fee           {} ({}%)", info.fee, info.fee_percentage);
    println!("token0        {}", info.token0);
    println!("token1        {}", info.token1);
    println!("liquidity     {}", info.liquidity);
    println!("tick spacing  {}", info.tick_spacing);
    println!("sqrtPriceX96  {}", info.sqrt_price_x96);
}

fn print_history(history: &PairHistory) {
    println!(
        "{} / {} - last {} days",
        history.pair.token0,
        history.pair.token1,
        history.days.len()
    );
    println!(
        "{:<14} {:>18} {:>18} {:>18} {:>18}",
        "date", "volume USD", "volume token0", "volume token1", "TVL USD"
    );
    for day in &history.days {
        println!(
            "{:<14} {:>18} {:>18} {:>18} {:>18}",
            day.date, day.volume_usd, day.volume_token0, day.volume_token1, day.tvl_usd
        );
    }
}

fn print_trending(pools: &[TrendingPool]) {
    println!("{} trending pools", pools.len());
    println!(
        "{:<6} {:<14} {:<24} {:>14} {:>10} {:>14}",
        "net", "dex", "pair", "vol 24h USD", "chg 24h%", "reserve USD"
    );
    for pool in pools {
        println!(
            "{:<6} {:<14} {:<24} {:>14} {:>10} {:>14}",
            pool.network,
            pool.dex,
            pool.name,
            pool.volume_usd_24h,
            pool.price_change_percentage_24h,
            pool.reserve_in_usd
        );
    }
}
