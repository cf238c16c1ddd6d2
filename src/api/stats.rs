//! Client for the remote wallet-stats endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::{ApiError, ApiResult};
use crate::types::WalletStats;

/// Remote source of per-wallet stats snapshots.
///
/// Implementations are stateless with respect to wallets: one fetch per
/// address, no internal retry. Retry policy belongs to the caller.
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Fetch the current stats snapshot for `address`.
    async fn wallet_stats(&self, address: &str) -> ApiResult<WalletStats>;
}

/// HTTP implementation of [`StatsProvider`] against the stats backend.
#[derive(Debug, Clone)]
pub struct HttpStatsClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpStatsClient {
    /// Create a client for the given backend base URL with a bounded
    /// request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let http = super::build_http_client(timeout)
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url.into()),
        })
    }

    /// Create a client reusing an existing HTTP client.
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url.into()),
        }
    }

    fn stats_url(&self, address: &str) -> ApiResult<reqwest::Url> {
        let raw = format!("{}/api/wallet/{}/stats", self.base_url, address);
        reqwest::Url::parse(&raw).map_err(|_| ApiError::InvalidUrl(raw))
    }
}

fn normalize_base_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[async_trait]
impl StatsProvider for HttpStatsClient {
    async fn wallet_stats(&self, address: &str) -> ApiResult<WalletStats> {
        let url = self.stats_url(address)?;
        tracing::debug!(address, "Fetching wallet stats");

        let response = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ApiError::RateLimited);
        }
        if !status.is_success() {
            return Err(ApiError::Http(status.as_u16()));
        }

        let stats: WalletStats =
            response.json().await.map_err(|e| ApiError::Decode(e.to_string()))?;
        tracing::debug!(
            address,
            positions = stats.positions_count,
            unclaimed = stats.unclaimed_fees,
            "Fetched wallet stats"
        );
        Ok(stats)
    }
}
