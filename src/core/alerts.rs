//! Transient notification banners.
//!
//! Banners are kept newest-first. Each one carries its own dismissal deadline,
//! so a sweep removes exactly the banners whose time is up; manual dismissal
//! does not wait for the timer.

use crate::domain::model::Severity;
use crate::domain::ports::Notifier;
use crate::utils::error::DashError;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_millis(5000);

/// Caller-supplied failure callback for a request.
pub type ErrorHandler = Arc<dyn Fn(&DashError) + Send + Sync>;

/// 有自訂處理就只交給它，否則顯示 danger 訊息
pub fn report_failure(error: &DashError, on_error: Option<&ErrorHandler>, notifier: &dyn Notifier) {
    match on_error {
        Some(handler) => handler(error),
        None => notifier.notify(&format!("An error occurred: {}", error), Severity::Danger),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub dismiss_at: Instant,
}

#[derive(Debug)]
pub struct AlertStack {
    alerts: Vec<Alert>,
    dismiss_after: Duration,
    next_id: u64,
}

impl Default for AlertStack {
    fn default() -> Self {
        Self::new(DEFAULT_DISMISS_AFTER)
    }
}

impl AlertStack {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            alerts: Vec::new(),
            dismiss_after,
            next_id: 1,
        }
    }

    /// 頁面載入時已經存在的訊息，從載入時間開始倒數
    pub fn from_existing<I, S>(dismiss_after: Duration, existing: I, loaded_at: Instant) -> Self
    where
        I: IntoIterator<Item = (S, Severity)>,
        S: Into<String>,
    {
        let mut stack = Self::new(dismiss_after);
        for (message, severity) in existing {
            let alert = stack.make_alert(message.into(), severity, loaded_at);
            stack.alerts.push(alert);
        }
        stack
    }

    fn make_alert(&mut self, message: String, severity: Severity, now: Instant) -> Alert {
        let id = self.next_id;
        self.next_id += 1;
        Alert {
            id,
            message,
            severity,
            dismiss_at: now + self.dismiss_after,
        }
    }

    /// Inserts a banner at the top and returns its id.
    pub fn push(&mut self, message: &str, severity: Severity, now: Instant) -> u64 {
        let alert = self.make_alert(message.to_string(), severity, now);
        let id = alert.id;
        self.alerts.insert(0, alert);
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|alert| alert.id != id);
        self.alerts.len() != before
    }

    /// Removes expired banners and returns how many went away.
    pub fn sweep(&mut self, now: Instant) -> usize {
        let before = self.alerts.len();
        self.alerts.retain(|alert| alert.dismiss_at > now);
        before - self.alerts.len()
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

/// Banner stack shared between the page and background tasks.
#[derive(Debug, Clone, Default)]
pub struct SharedAlerts {
    inner: Arc<Mutex<AlertStack>>,
}

impl SharedAlerts {
    pub fn new(stack: AlertStack) -> Self {
        Self {
            inner: Arc::new(Mutex::new(stack)),
        }
    }

    fn with_stack<R>(&self, f: impl FnOnce(&mut AlertStack) -> R) -> Option<R> {
        match self.inner.lock() {
            Ok(mut stack) => Some(f(&mut stack)),
            Err(_) => {
                tracing::error!("alert stack lock poisoned");
                None
            }
        }
    }

    pub fn dismiss(&self, id: u64) -> bool {
        self.with_stack(|stack| stack.dismiss(id)).unwrap_or(false)
    }

    pub fn sweep(&self, now: Instant) -> usize {
        self.with_stack(|stack| stack.sweep(now)).unwrap_or(0)
    }

    pub fn snapshot(&self) -> Vec<Alert> {
        self.with_stack(|stack| stack.alerts().to_vec())
            .unwrap_or_default()
    }

    /// Runs `sweep` every `period` for as long as the handle lives.
    pub fn spawn_sweeper(&self, period: Duration) -> JoinHandle<()> {
        let alerts = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let removed = alerts.sweep(Instant::now());
                if removed > 0 {
                    tracing::debug!(removed, "alerts auto-dismissed");
                }
            }
        })
    }
}

impl Notifier for SharedAlerts {
    fn notify(&self, message: &str, severity: Severity) {
        self.with_stack(|stack| stack.push(message, severity, Instant::now()));
    }
}

/// Emits banners as tracing events; used when there is no page to draw on.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Danger => tracing::error!("❌ {}", message),
            Severity::Warning => tracing::warn!("⚠️ {}", message),
            Severity::Success => tracing::info!("✅ {}", message),
            Severity::Info => tracing::info!("{}", message),
        }
    }
}
