use crate::domain::model::Severity;
use crate::domain::ports::{Clipboard, Notifier};

pub const COPY_SUCCESS_MESSAGE: &str = "Copied to clipboard!";
pub const COPY_FAILURE_MESSAGE: &str = "Could not copy to clipboard!";

/// 複製結果一律以通知呈現，不回傳錯誤
pub fn copy_to_clipboard(clipboard: &dyn Clipboard, text: &str, notifier: &dyn Notifier) -> bool {
    match clipboard.write_text(text) {
        Ok(()) => {
            notifier.notify(COPY_SUCCESS_MESSAGE, Severity::Success);
            true
        }
        Err(e) => {
            tracing::warn!("Clipboard write failed: {}", e);
            notifier.notify(COPY_FAILURE_MESSAGE, Severity::Danger);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alerts::SharedAlerts;
    use crate::utils::error::{DashError, Result};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryClipboard {
        content: Mutex<Option<String>>,
        broken: bool,
    }

    impl Clipboard for MemoryClipboard {
        fn write_text(&self, text: &str) -> Result<()> {
            if self.broken {
                return Err(DashError::ClipboardError {
                    message: "permission denied".to_string(),
                });
            }
            *self.content.lock().unwrap() = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_copy_success_notifies() {
        let clipboard = MemoryClipboard::default();
        let alerts = SharedAlerts::default();

        assert!(copy_to_clipboard(&clipboard, "KEY-123", &alerts));
        assert_eq!(clipboard.content.lock().unwrap().as_deref(), Some("KEY-123"));
        let shown = alerts.snapshot();
        assert_eq!(shown[0].message, COPY_SUCCESS_MESSAGE);
        assert_eq!(shown[0].severity, Severity::Success);
    }

    #[test]
    fn test_copy_failure_notifies() {
        let clipboard = MemoryClipboard {
            broken: true,
            ..Default::default()
        };
        let alerts = SharedAlerts::default();

        assert!(!copy_to_clipboard(&clipboard, "KEY-123", &alerts));
        let shown = alerts.snapshot();
        assert_eq!(shown[0].message, COPY_FAILURE_MESSAGE);
        assert_eq!(shown[0].severity, Severity::Danger);
    }
}
