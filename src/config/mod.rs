pub mod toml_config;

pub use toml_config::{EmailConfig, FeedConfig, InsightConfig, WatchConfig, WatchlistConfig};

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "regwatch")]
#[command(about = "Watchlist alerting over the FDA Federal Register notice feed")]
pub struct CliConfig {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "regwatch.toml")]
    pub config: String,

    /// Comma-separated company names, overriding the configured watchlist
    #[arg(long)]
    pub watchlist: Option<String>,

    /// Use one synthetic notice instead of the live feed
    #[arg(long)]
    pub test_mode: bool,

    /// Repeat the scan pass every N seconds instead of running once
    #[arg(long)]
    pub interval_secs: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
