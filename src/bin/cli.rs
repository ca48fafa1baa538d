//! NAV Dashboard CLI
//!
//! One-shot operations against the same configuration the server uses:
//! - Read the contract once and print the metrics
//! - Check a NAV log for schema and date problems
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use nav_dashboard::chain::{ChainEndpoint, ChainSource};
use nav_dashboard::config::{generate_default_config, Config};
use nav_dashboard::history::HistoryLoader;
use nav_dashboard::presenter::format::{format_cell, format_nav, format_supply};

#[derive(Parser)]
#[command(name = "nav-dashboard-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect the fund token and its NAV log")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: user config dir, then ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read NAV, supply, name and symbol from the contract
    Snapshot {
        /// Read at the latest block instead of pinning one height
        #[arg(long)]
        no_pin: bool,
    },

    /// Load the NAV log and report what the dashboard would see
    CheckHistory {
        /// NAV log path (default: from config)
        path: Option<PathBuf>,
    },

    /// Generate default config file
    InitConfig {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };

    nav_dashboard::logging::init(&config.logging);

    match cli.command {
        Commands::Snapshot { no_pin } => {
            let contract = config.chain.contract()?;
            let endpoint = ChainEndpoint::new(
                config.chain.rpc_url.clone(),
                contract,
                config.chain.request_timeout(),
                config.chain.pin_block && !no_pin,
            )?;

            let view = endpoint
                .fetch_view()
                .await
                .with_context(|| format!("reading {} via {}", contract, endpoint.rpc_url()))?;

            let nav = format_nav(view.nav()?);
            let supply = format_supply(view.total_supply_whole(), &view.symbol);

            match cli.format.as_str() {
                "json" => {
                    let body = serde_json::json!({
                        "contract": contract.checksummed(),
                        "name": view.name,
                        "symbol": view.symbol,
                        "block": view.block,
                        "nav": nav,
                        "total_supply": supply,
                        "total_supply_raw": view.total_supply_raw.to_string(),
                    });
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                _ => {
                    println!("{} ({})", view.name, view.symbol);
                    println!("Contract:     {}", contract);
                    if let Some(block) = view.block {
                        println!("Block:        {}", block);
                    }
                    println!();
                    println!("Live NAV:     {}", nav);
                    println!("Total Supply: {}", supply);
                }
            }
        }

        Commands::CheckHistory { path } => {
            let path = path.unwrap_or_else(|| config.history.path.clone());

            if !path.exists() {
                eprintln!("File not found: {:?}", path);
                std::process::exit(1);
            }

            let history = HistoryLoader::new().load(&path)?;
            let undated = history.undated_count();

            println!("NAV log: {}", path.display());
            println!("  Rows:         {}", history.len());
            println!("  Undated rows: {}", undated);
            println!("  Policy:       {:?}", config.history.undated_rows);

            if let Some(latest) = history.latest() {
                println!();
                println!(
                    "Latest: {}  nav={}  return={}",
                    latest.date,
                    format_cell(latest.nav),
                    format_cell(latest.daily_return)
                );
            }

            if undated > 0 {
                println!();
                println!("Undated rows (first 10):");
                for record in history
                    .records()
                    .iter()
                    .filter(|r| r.date.is_missing())
                    .take(10)
                {
                    println!("  line {}: {}", record.line, record.date);
                }
            }

            match history.apply_policy(config.history.undated_rows) {
                Ok((kept, excluded)) => {
                    println!();
                    println!("Dashboard would show {} row(s), {} excluded", kept.len(), excluded);
                }
                Err(e) => {
                    eprintln!();
                    eprintln!("Dashboard would fail: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::InitConfig { output } => {
            let content = generate_default_config();

            if let Some(path) = output {
                std::fs::write(&path, &content)?;
                println!("Config written to: {:?}", path);
            } else {
                println!("{}", content);
            }
        }
    }

    Ok(())
}
