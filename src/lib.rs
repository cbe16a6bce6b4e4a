pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{
    http::{ApiClient, HttpStatsSource},
    storage::LocalDownloads,
};
pub use config::toml_config::DashboardConfig;
pub use core::{
    alerts::{LogNotifier, SharedAlerts},
    page::Page,
    stats::{Dashboard, StatsPoller},
};
pub use utils::error::{DashError, Result};
