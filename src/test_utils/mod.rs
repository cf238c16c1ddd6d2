//! Mock implementations of the remote seams for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::{StatsProvider, SubscriptionService};
use crate::error::{ApiError, ApiResult, SubscriptionError, SubscriptionResult};
use crate::types::WalletStats;

/// Programmable in-memory [`StatsProvider`].
///
/// Responses are keyed by address; unknown addresses fail with `Http(404)`.
/// An optional per-address delay simulates slow fetches, which tests use to
/// race a fetch against a concurrent removal.
#[derive(Default)]
pub struct MockStatsProvider {
    responses: Mutex<HashMap<String, Result<WalletStats, ApiError>>>,
    delays: Mutex<HashMap<String, Duration>>,
    calls: Mutex<Vec<String>>,
}

impl MockStatsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Program a successful response for `address`.
    pub fn set_stats(&self, address: impl Into<String>, stats: WalletStats) {
        self.responses.lock().unwrap().insert(address.into(), Ok(stats));
    }

    /// Program a failure for `address`.
    pub fn set_error(&self, address: impl Into<String>, error: ApiError) {
        self.responses.lock().unwrap().insert(address.into(), Err(error));
    }

    /// Delay responses for `address` by the given duration.
    pub fn set_delay(&self, address: impl Into<String>, delay: Duration) {
        self.delays.lock().unwrap().insert(address.into(), delay);
    }

    /// Addresses fetched so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatsProvider for MockStatsProvider {
    async fn wallet_stats(&self, address: &str) -> ApiResult<WalletStats> {
        self.calls.lock().unwrap().push(address.to_string());

        let delay = self.delays.lock().unwrap().get(address).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let response = self.responses.lock().unwrap().get(address).cloned();
        match response {
            Some(result) => result,
            None => Err(ApiError::Http(404)),
        }
    }
}

/// Recorded subscription operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionCall {
    Subscribe(String),
    Unsubscribe(String),
}

/// Recording in-memory [`SubscriptionService`] with failure injection.
#[derive(Default)]
pub struct MockSubscriptionService {
    calls: Mutex<Vec<SubscriptionCall>>,
    fail_subscribe: Mutex<Option<SubscriptionError>>,
    fail_unsubscribe: Mutex<Option<SubscriptionError>>,
}

impl MockSubscriptionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subscribe call fail with `error`.
    pub fn fail_subscribe_with(&self, error: SubscriptionError) {
        *self.fail_subscribe.lock().unwrap() = Some(error);
    }

    /// Make every unsubscribe call fail with `error`.
    pub fn fail_unsubscribe_with(&self, error: SubscriptionError) {
        *self.fail_unsubscribe.lock().unwrap() = Some(error);
    }

    /// Operations performed so far, in call order.
    pub fn calls(&self) -> Vec<SubscriptionCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubscriptionService for MockSubscriptionService {
    async fn subscribe(&self, wallet: &str) -> SubscriptionResult<()> {
        self.calls.lock().unwrap().push(SubscriptionCall::Subscribe(wallet.to_string()));
        match self.fail_subscribe.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn unsubscribe(&self, wallet: &str) -> SubscriptionResult<()> {
        self.calls.lock().unwrap().push(SubscriptionCall::Unsubscribe(wallet.to_string()));
        match self.fail_unsubscribe.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
