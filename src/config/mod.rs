pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "keydash")]
#[command(about = "Admin dashboard toolkit: stats polling and key table utilities")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Poll the stats endpoint and log dashboard counter updates
    Poll {
        /// Overrides server.base_url
        #[arg(long)]
        base_url: Option<String>,

        /// Overrides stats.interval_ms
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Page path the poller runs on; polling only starts inside /admin/
        #[arg(long, default_value = "/admin/dashboard")]
        path: String,

        /// Fetch a single snapshot and exit
        #[arg(long)]
        once: bool,
    },

    /// Load a CSV table, optionally search and sort it, then export it
    Table {
        /// CSV file whose first record is the header
        #[arg(long)]
        input: String,

        /// Column index to sort by (repeat to toggle direction)
        #[arg(long)]
        sort: Vec<usize>,

        /// Case-insensitive search term
        #[arg(long)]
        search: Option<String>,

        /// Directory the export is written to
        #[arg(long, default_value = "./output")]
        output: String,

        /// Overrides table.export_filename
        #[arg(long)]
        filename: Option<String>,
    },
}
