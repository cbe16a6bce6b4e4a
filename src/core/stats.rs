//! Periodic refresh of the per-module counters on the dashboard.

use crate::core::alerts::{report_failure, ErrorHandler};
use crate::domain::model::{ModuleStats, StatsSnapshot};
use crate::domain::ports::{Notifier, StatsSource};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

pub const DEFAULT_STATS_ENDPOINT: &str = "/admin/api/stats";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(30000);
pub const ADMIN_PATH_MARKER: &str = "/admin/";

/// Text shown by one module card (`total-count`, `active-count`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardCounters {
    pub total: String,
    pub active: String,
    pub expired: String,
    pub used_up: String,
}

impl CardCounters {
    fn overwrite(&mut self, stats: &ModuleStats) {
        self.total = stats.total.to_string();
        self.active = stats.active.to_string();
        self.expired = stats.expired.to_string();
        self.used_up = stats.used_up.to_string();
    }
}

/// Module cards keyed by their `data-module` name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dashboard {
    cards: BTreeMap<String, CardCounters>,
    discover: bool,
}

impl Dashboard {
    /// 沒有預先設定卡片時，依快照中出現的模組建立卡片
    pub fn discovering() -> Self {
        Self {
            cards: BTreeMap::new(),
            discover: true,
        }
    }

    pub fn with_modules<I, S>(modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cards: modules
                .into_iter()
                .map(|m| (m.into(), CardCounters::default()))
                .collect(),
            discover: false,
        }
    }

    pub fn card(&self, module: &str) -> Option<&CardCounters> {
        self.cards.get(module)
    }

    pub fn cards(&self) -> impl Iterator<Item = (&String, &CardCounters)> {
        self.cards.iter()
    }

    /// 只更新有卡片的模組（discover 模式會先補上卡片），回傳被更新的模組名稱
    pub fn apply_snapshot(&mut self, snapshot: &StatsSnapshot) -> Vec<String> {
        let mut updated = Vec::new();
        for (module, stats) in snapshot {
            if self.discover && !self.cards.contains_key(module) {
                tracing::debug!(module = %module, "adding card for new module");
                self.cards.insert(module.clone(), CardCounters::default());
            }
            match self.cards.get_mut(module) {
                Some(card) => {
                    card.overwrite(stats);
                    updated.push(module.clone());
                }
                None => tracing::debug!(module = %module, "no card for module, skipping"),
            }
        }
        updated
    }
}

pub type SharedDashboard = Arc<Mutex<Dashboard>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Updated(Vec<String>),
    /// 伺服器回應 `success: false`
    Rejected,
    Failed,
}

#[derive(Clone)]
pub struct StatsPoller {
    source: Arc<dyn StatsSource>,
    dashboard: SharedDashboard,
    notifier: Arc<dyn Notifier>,
    on_error: Option<ErrorHandler>,
    interval: Duration,
}

impl StatsPoller {
    pub fn new(
        source: Arc<dyn StatsSource>,
        dashboard: SharedDashboard,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            source,
            dashboard,
            notifier,
            on_error: None,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// A custom handler takes over failures; no banner is shown then.
    pub fn with_error_handler(mut self, handler: ErrorHandler) -> Self {
        self.on_error = Some(handler);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub async fn poll_once(&self) -> PollOutcome {
        let response = match self.source.fetch_stats().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Stats request failed: {}", e);
                report_failure(&e, self.on_error.as_ref(), self.notifier.as_ref());
                return PollOutcome::Failed;
            }
        };

        if !response.success {
            tracing::debug!("stats endpoint reported success=false, counters unchanged");
            return PollOutcome::Rejected;
        }

        let updated = self.dashboard.lock().await.apply_snapshot(&response.data);
        tracing::debug!(modules = ?updated, "dashboard counters refreshed");
        PollOutcome::Updated(updated)
    }

    /// Polls every interval until the handle is aborted. The first request goes
    /// out after one full period. Each tick runs in its own task, so a slow
    /// response never delays the next request.
    pub fn start(self) -> JoinHandle<()> {
        tracing::info!("🔄 Stats polling every {:?}", self.interval);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            interval.tick().await; // 第一次 tick 會立即觸發，略過
            loop {
                interval.tick().await;
                let poller = self.clone();
                tokio::spawn(async move {
                    poller.poll_once().await;
                });
            }
        })
    }
}

pub fn is_admin_path(path: &str) -> bool {
    path.contains(ADMIN_PATH_MARKER)
}

/// Starts polling only on pages inside the admin section.
pub fn start_if_admin(path: &str, poller: StatsPoller) -> Option<JoinHandle<()>> {
    if !is_admin_path(path) {
        tracing::debug!(path, "not an admin page, stats polling disabled");
        return None;
    }
    Some(poller.start())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(total: u64, active: u64, expired: u64, used_up: u64) -> ModuleStats {
        ModuleStats {
            total,
            active,
            expired,
            used_up,
        }
    }

    #[test]
    fn test_apply_snapshot_touches_only_present_modules() {
        let mut dashboard = Dashboard::with_modules(["licenses", "voice"]);
        let mut snapshot = StatsSnapshot::new();
        snapshot.insert("licenses".to_string(), stats(10, 7, 2, 1));
        snapshot.insert("unknown".to_string(), stats(1, 1, 0, 0));

        let updated = dashboard.apply_snapshot(&snapshot);

        assert_eq!(updated, vec!["licenses".to_string()]);
        let card = dashboard.card("licenses").unwrap();
        assert_eq!(card.total, "10");
        assert_eq!(card.active, "7");
        assert_eq!(card.expired, "2");
        assert_eq!(card.used_up, "1");
        assert_eq!(dashboard.card("voice"), Some(&CardCounters::default()));
        assert!(dashboard.card("unknown").is_none());
    }

    #[test]
    fn test_discovering_dashboard_adds_cards() {
        let mut dashboard = Dashboard::discovering();
        let mut snapshot = StatsSnapshot::new();
        snapshot.insert("voice".to_string(), stats(4, 3, 1, 0));
        snapshot.insert("image".to_string(), stats(2, 2, 0, 0));

        let updated = dashboard.apply_snapshot(&snapshot);

        assert_eq!(updated, vec!["image".to_string(), "voice".to_string()]);
        assert_eq!(dashboard.card("voice").unwrap().total, "4");

        // 之後沒出現在快照中的模組保持原值
        let mut next = StatsSnapshot::new();
        next.insert("image".to_string(), stats(5, 5, 0, 0));
        dashboard.apply_snapshot(&next);
        assert_eq!(dashboard.card("voice").unwrap().total, "4");
        assert_eq!(dashboard.card("image").unwrap().total, "5");
    }

    #[test]
    fn test_is_admin_path() {
        assert!(is_admin_path("/admin/dashboard"));
        assert!(is_admin_path("/portal/admin/keys"));
        assert!(!is_admin_path("/admin"));
        assert!(!is_admin_path("/api/voice"));
    }
}
