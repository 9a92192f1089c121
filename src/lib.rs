pub mod clients;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliArgs;

pub use crate::clients::{PipedriveClient, ShopifyOrderSource};
pub use crate::config::toml_config::{PipedriveConfig, ShopifyConfig, SyncConfig};
pub use crate::core::engine::{SyncEngine, SyncOutcome};
pub use crate::core::orchestrator::{SyncOptions, SyncOrchestrator};
pub use crate::utils::error::{Result, SyncError};
