use crate::domain::model::{Severity, StatsResponse};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Fetches one stats snapshot from the server.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch_stats(&self) -> Result<StatsResponse>;
}

pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Where exported files end up.
pub trait DownloadTarget: Send + Sync {
    /// 不支援下載時匯出會靜默略過
    fn supports_download(&self) -> bool {
        true
    }

    fn save(
        &self,
        filename: &str,
        mime_type: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<PathBuf>> + Send;
}

pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

pub trait Confirmer: Send + Sync {
    fn confirm(&self, question: &str) -> bool;
}
