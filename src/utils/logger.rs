use crate::config::toml_config::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins; otherwise the configured level applies, raised to debug by `--verbose`.
pub fn filter_directive(logging: &LoggingConfig, verbose: bool) -> String {
    if verbose || logging.level == "debug" {
        "keydash=debug,info".to_string()
    } else {
        format!("keydash={}", logging.level)
    }
}

/// 依設定選擇 compact 或 JSON 輸出
pub fn init_logger(logging: &LoggingConfig, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(logging, verbose)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry.with(fmt_layer.json()).init();
    } else {
        registry.with(fmt_layer.compact()).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        let mut logging = LoggingConfig::default();
        assert_eq!(filter_directive(&logging, false), "keydash=info");
        assert_eq!(filter_directive(&logging, true), "keydash=debug,info");

        logging.level = "warn".to_string();
        assert_eq!(filter_directive(&logging, false), "keydash=warn");
        logging.level = "debug".to_string();
        assert_eq!(filter_directive(&logging, false), "keydash=debug,info");
    }
}
