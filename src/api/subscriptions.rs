//! Client for the remote push-subscription endpoint.
//!
//! Subscriptions link an opaque device token to a wallet address so the
//! backend can deliver push events. Both calls here are best-effort side
//! channels: a failure must never block or roll back the wallet operation
//! that triggered it, so callers log and move on.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::{SubscriptionError, SubscriptionResult};

/// Header carrying the device token on unsubscribe.
const DEVICE_TOKEN_HEADER: &str = "X-Device-Token";

/// Remote push-subscription registry.
#[async_trait]
pub trait SubscriptionService: Send + Sync {
    /// Register the device for push events about `wallet`.
    async fn subscribe(&self, wallet: &str) -> SubscriptionResult<()>;

    /// Deregister the device from push events about `wallet`.
    async fn unsubscribe(&self, wallet: &str) -> SubscriptionResult<()>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubscribeBody<'a> {
    device_token: &'a str,
    wallet: &'a str,
    platform: &'a str,
}

/// HTTP implementation of [`SubscriptionService`].
///
/// The device token is supplied by the platform layer whenever it becomes
/// available; until then both calls fail with `NoDeviceToken` and no state
/// change is assumed.
#[derive(Debug, Clone)]
pub struct HttpSubscriptionClient {
    http: reqwest::Client,
    base_url: String,
    platform: String,
    device_token: Arc<RwLock<Option<String>>>,
}

impl HttpSubscriptionClient {
    /// Create a client for the given backend base URL.
    pub fn new(
        base_url: impl Into<String>,
        platform: impl Into<String>,
        timeout: Duration,
    ) -> SubscriptionResult<Self> {
        let http = super::build_http_client(timeout)
            .map_err(|e| SubscriptionError::Transport(e.to_string()))?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self {
            http,
            base_url,
            platform: platform.into(),
            device_token: Arc::new(RwLock::new(None)),
        })
    }

    /// Store the device token obtained from the push platform.
    pub async fn set_device_token(&self, token: impl Into<String>) {
        *self.device_token.write().await = Some(token.into());
    }

    /// Whether a device token is currently available.
    pub async fn has_device_token(&self) -> bool {
        self.device_token.read().await.is_some()
    }

    async fn require_token(&self) -> SubscriptionResult<String> {
        self.device_token.read().await.clone().ok_or(SubscriptionError::NoDeviceToken)
    }
}

#[async_trait]
impl SubscriptionService for HttpSubscriptionClient {
    async fn subscribe(&self, wallet: &str) -> SubscriptionResult<()> {
        let token = self.require_token().await?;
        let url = format!("{}/api/subscriptions", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(&SubscribeBody {
                device_token: &token,
                wallet,
                platform: &self.platform,
            })
            .send()
            .await
            .map_err(|e| SubscriptionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubscriptionError::RegistrationFailed(status.as_u16()));
        }
        tracing::debug!(wallet, "Subscribed wallet for push events");
        Ok(())
    }

    async fn unsubscribe(&self, wallet: &str) -> SubscriptionResult<()> {
        let token = self.require_token().await?;
        let url = format!("{}/api/subscriptions/{}", self.base_url, wallet);

        let response = self
            .http
            .delete(&url)
            .header(DEVICE_TOKEN_HEADER, token)
            .send()
            .await
            .map_err(|e| SubscriptionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubscriptionError::UnsubscribeFailed(status.as_u16()));
        }
        tracing::debug!(wallet, "Unsubscribed wallet from push events");
        Ok(())
    }
}
