use crate::domain::ports::DownloadTarget;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Saves downloads into a local directory.
#[derive(Debug, Clone)]
pub struct LocalDownloads {
    base_path: String,
}

impl LocalDownloads {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl DownloadTarget for LocalDownloads {
    async fn save(&self, filename: &str, mime_type: &str, data: &[u8]) -> Result<PathBuf> {
        let full_path = Path::new(&self.base_path).join(filename);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, data).await?;
        tracing::debug!(
            path = %full_path.display(),
            mime_type,
            bytes = data.len(),
            "download written"
        );
        Ok(full_path)
    }
}

/// 無法下載的環境，例如沒有輸出目錄的唯讀模式
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDownloads;

impl DownloadTarget for NoDownloads {
    fn supports_download(&self) -> bool {
        false
    }

    async fn save(&self, filename: &str, _mime_type: &str, _data: &[u8]) -> Result<PathBuf> {
        Ok(PathBuf::from(filename))
    }
}
