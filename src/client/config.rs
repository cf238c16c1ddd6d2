//! Configuration for the wallet tracker client.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, TrackerError};

/// Default bound on concurrently in-flight stats fetches during refresh-all.
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 8;

/// Configuration for the tracker client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the stats backend.
    pub stats_base_url: String,

    /// Base URL of the push-subscription backend.
    pub subscription_base_url: String,

    /// Bounded per-request timeout applied to every remote call.
    pub request_timeout: Duration,

    /// Path for persistent storage of the wallet list.
    pub storage_path: PathBuf,

    /// Platform tag sent in the subscription body.
    pub platform: String,

    /// Maximum number of stats fetches in flight at once during refresh-all.
    pub max_concurrent_fetches: usize,

    /// Refresh all wallet stats when the client starts.
    pub refresh_on_start: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stats_base_url: "https://bagstats.xyz".to_string(),
            subscription_base_url: "https://api.bagstats.xyz".to_string(),
            request_timeout: Duration::from_secs(30),
            storage_path: PathBuf::from("./bags-tracker-storage"),
            platform: "ios".to_string(),
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            refresh_on_start: true,
        }
    }
}

impl Config {
    /// Create a configuration pointing both endpoints at one backend.
    pub fn new(backend_url: impl Into<String>) -> Self {
        let url = backend_url.into();
        Self {
            stats_base_url: url.clone(),
            subscription_base_url: url,
            ..Self::default()
        }
    }

    /// Set the stats backend base URL.
    pub fn with_stats_base_url(mut self, url: impl Into<String>) -> Self {
        self.stats_base_url = url.into();
        self
    }

    /// Set the subscription backend base URL.
    pub fn with_subscription_base_url(mut self, url: impl Into<String>) -> Self {
        self.subscription_base_url = url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the storage path.
    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }

    /// Set the platform tag sent when subscribing.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Bound the number of concurrent fetches during refresh-all.
    pub fn with_max_concurrent_fetches(mut self, max: usize) -> Self {
        self.max_concurrent_fetches = max.max(1);
        self
    }

    /// Disable the automatic refresh on start.
    pub fn without_refresh_on_start(mut self) -> Self {
        self.refresh_on_start = false;
        self
    }

    /// Reject values that cannot work at runtime.
    pub fn validate(&self) -> Result<()> {
        if self.stats_base_url.trim().is_empty() {
            return Err(TrackerError::Config("stats_base_url must not be empty".to_string()));
        }
        if self.subscription_base_url.trim().is_empty() {
            return Err(TrackerError::Config(
                "subscription_base_url must not be empty".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(TrackerError::Config("request_timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}
