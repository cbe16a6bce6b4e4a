use crate::core::alerts::{report_failure, ErrorHandler};
use crate::domain::model::StatsResponse;
use crate::domain::ports::{Notifier, StatsSource};
use crate::utils::error::{DashError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::time::Duration;
use url::Url;

/// Thin JSON client for the admin API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| DashError::InvalidConfigValueError {
            field: "base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// 絕對 URL 直接使用，其餘視為相對於 base URL 的路徑
    pub fn resolve(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| DashError::InvalidConfigValueError {
                field: "endpoint".to_string(),
                value: path.to_string(),
                reason: format!("Cannot resolve against {}: {}", self.base_url, e),
            })
    }

    /// Sends one request; a body is serialized as JSON.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value> {
        let url = self.resolve(path)?;
        tracing::debug!("Making {} request to: {}", method, url);

        let mut request = self.client.request(method, url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(DashError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json().await?)
    }

    /// Like [`ApiClient::request`], but failures go to `on_error` when given,
    /// otherwise to a danger banner.
    pub async fn request_with(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        on_error: Option<&ErrorHandler>,
        notifier: &dyn Notifier,
    ) -> Option<serde_json::Value> {
        match self.request(method, path, body).await {
            Ok(value) => Some(value),
            Err(e) => {
                report_failure(&e, on_error, notifier);
                None
            }
        }
    }
}

/// Stats source backed by `GET <endpoint>`.
#[derive(Debug, Clone)]
pub struct HttpStatsSource {
    api: ApiClient,
    endpoint: String,
}

impl HttpStatsSource {
    pub fn new(api: ApiClient, endpoint: impl Into<String>) -> Self {
        Self {
            api,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl StatsSource for HttpStatsSource {
    async fn fetch_stats(&self) -> Result<StatsResponse> {
        let value = self.api.request(Method::GET, &self.endpoint, None).await?;
        Ok(serde_json::from_value(value)?)
    }
}
