use crate::core::alerts::DEFAULT_DISMISS_AFTER;
use crate::core::csv_export::DEFAULT_EXPORT_FILENAME;
use crate::core::page::{DEFAULT_COUNTER_ID, DEFAULT_TABLE_ID};
use crate::core::stats::{DEFAULT_POLL_INTERVAL, DEFAULT_STATS_ENDPOINT};
use crate::utils::error::{DashError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub alerts: AlertConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(default = "default_stats_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// 卡片上要顯示的模組
    #[serde(default)]
    pub modules: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default = "default_table_id")]
    pub table_id: String,
    #[serde(default = "default_counter_id")]
    pub counter_id: String,
    #[serde(default = "default_export_filename")]
    pub export_filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    #[serde(default = "default_dismiss_after_ms")]
    pub dismiss_after_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_stats_endpoint() -> String {
    DEFAULT_STATS_ENDPOINT.to_string()
}

fn default_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL.as_millis() as u64
}

fn default_table_id() -> String {
    DEFAULT_TABLE_ID.to_string()
}

fn default_counter_id() -> String {
    DEFAULT_COUNTER_ID.to_string()
}

fn default_export_filename() -> String {
    DEFAULT_EXPORT_FILENAME.to_string()
}

fn default_dismiss_after_ms() -> u64 {
    DEFAULT_DISMISS_AFTER.as_millis() as u64
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_stats_endpoint(),
            interval_ms: default_interval_ms(),
            modules: Vec::new(),
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            table_id: default_table_id(),
            counter_id: default_counter_id(),
            export_filename: default_export_filename(),
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: default_dismiss_after_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl DashboardConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DashError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| DashError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ADMIN_URL})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::LazyLock;

        static ENV_VAR: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.stats.interval_ms)
    }

    pub fn dismiss_after(&self) -> Duration {
        Duration::from_millis(self.alerts.dismiss_after_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.server.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for DashboardConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("server.base_url", &self.server.base_url)?;
        validation::validate_endpoint("stats.endpoint", &self.stats.endpoint)?;
        validation::validate_positive_number("stats.interval_ms", self.stats.interval_ms, 1)?;
        validation::validate_positive_number(
            "alerts.dismiss_after_ms",
            self.alerts.dismiss_after_ms,
            1,
        )?;
        validation::validate_non_empty_string("table.table_id", &self.table.table_id)?;
        validation::validate_non_empty_string(
            "table.export_filename",
            &self.table.export_filename,
        )?;

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(DashError::InvalidConfigValueError {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
                reason: format!("Valid levels: {}", valid_levels.join(", ")),
            });
        }

        Ok(())
    }
}
