pub mod toml_config;

pub use toml_config::{PipedriveConfig, ShopifyConfig, SyncConfig};

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "order-crm-sync")]
#[command(about = "One-shot sync of a commerce order into a CRM deal")]
pub struct CliArgs {
    #[arg(long, default_value = "./order-crm-sync.toml")]
    pub config: String,

    #[arg(long, help = "Override the order id from the config file")]
    pub order_id: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}
