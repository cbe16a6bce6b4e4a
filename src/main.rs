use clap::Parser;
use keydash::config::Command;
use keydash::core::{csv_export, page::Page, stats};
use keydash::utils::{logger, validation::Validate};
use keydash::{
    ApiClient, CliConfig, Dashboard, DashError, DashboardConfig, HttpStatsSource, LocalDownloads,
    LogNotifier, StatsPoller,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let mut config = match &cli.config {
        Some(path) => match DashboardConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => DashboardConfig::default(),
    };

    // 命令列參數覆蓋設定檔
    if let Command::Poll {
        base_url,
        interval_ms,
        ..
    } = &cli.command
    {
        if let Some(base_url) = base_url {
            config.server.base_url = base_url.clone();
        }
        if let Some(interval_ms) = interval_ms {
            config.stats.interval_ms = *interval_ms;
        }
    }

    // 初始化日誌
    logger::init_logger(&config.logging, cli.verbose);

    tracing::info!("Starting keydash");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let result = match cli.command {
        Command::Poll { path, once, .. } => run_poll(&config, &path, once).await,
        Command::Table {
            input,
            sort,
            search,
            output,
            filename,
        } => run_table(&config, &input, &sort, search.as_deref(), output, filename).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ keydash failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run_poll(config: &DashboardConfig, path: &str, once: bool) -> Result<(), DashError> {
    let api = ApiClient::with_timeout(&config.server.base_url, config.request_timeout())?;
    let source = Arc::new(HttpStatsSource::new(api, config.stats.endpoint.clone()));
    let dashboard = if config.stats.modules.is_empty() {
        tracing::info!("No stats.modules configured, cards follow the modules the server reports");
        Dashboard::discovering()
    } else {
        Dashboard::with_modules(config.stats.modules.iter().cloned())
    };
    let dashboard = Arc::new(Mutex::new(dashboard));

    let poller = StatsPoller::new(source, dashboard.clone(), Arc::new(LogNotifier))
        .with_interval(config.poll_interval());

    if once {
        let outcome = poller.poll_once().await;
        tracing::info!("📊 Poll outcome: {:?}", outcome);
        log_dashboard(&*dashboard.lock().await);
        return Ok(());
    }

    let Some(handle) = stats::start_if_admin(path, poller) else {
        tracing::warn!("Path '{}' is outside the admin section, nothing to poll", path);
        return Ok(());
    };

    // 定期輸出目前卡片上的數字，直到收到 Ctrl-C
    let mut report = tokio::time::interval(config.poll_interval().max(Duration::from_secs(1)));
    loop {
        tokio::select! {
            _ = report.tick() => log_dashboard(&*dashboard.lock().await),
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stopping stats polling");
                handle.abort();
                return Ok(());
            }
        }
    }
}

fn log_dashboard(dashboard: &Dashboard) {
    for (module, card) in dashboard.cards() {
        tracing::info!(
            "📊 {}: total={} active={} expired={} used_up={}",
            module,
            card.total,
            card.active,
            card.expired,
            card.used_up
        );
    }
}

async fn run_table(
    config: &DashboardConfig,
    input: &str,
    sort: &[usize],
    search: Option<&str>,
    output: String,
    filename: Option<String>,
) -> Result<(), DashError> {
    let table_id = config.table.table_id.as_str();
    let file = std::fs::File::open(input)?;
    let table = csv_export::import_csv(table_id, file)?;

    let mut page = Page::new("/admin/keys").with_counter_id(config.table.counter_id.clone());
    page.add_table(table);
    page.set_text(config.table.counter_id.clone(), "");

    if let Some(term) = search {
        let visible = page.search_table(table_id, term)?;
        tracing::info!("🔍 {} rows match '{}'", visible, term);
    }

    for &column in sort {
        let direction = page.sort_table(table_id, column)?;
        tracing::info!("Sorted column {} ({:?})", column, direction);
    }

    let filename = filename.unwrap_or_else(|| config.table.export_filename.clone());
    let target = LocalDownloads::new(output);
    if let Some(path) = page.export_table(table_id, &filename, &target).await? {
        println!("📁 Output saved to: {}", path.display());
    }

    Ok(())
}
