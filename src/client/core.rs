//! Core tracker client: coordinates the wallet collection, the stats
//! endpoint and the subscription endpoint.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::api::{HttpStatsClient, HttpSubscriptionClient, StatsProvider, SubscriptionService};
use crate::collection::WalletCollection;
use crate::error::{Result, TrackerError};
use crate::storage::{DiskWalletStorage, WalletStorage};
use crate::types::{
    AddOutcome, NotificationPayload, RefreshSummary, WalletEntry, WalletStats, WalletUpdate,
};

use super::Config;

/// Standard production configuration: disk storage and HTTP backends.
pub type StandardTrackerClient =
    TrackerClient<DiskWalletStorage, HttpStatsClient, HttpSubscriptionClient>;

/// Wallet tracker client, generic over its three seams.
///
/// - `S: WalletStorage` - durable persistence of the wallet list
/// - `A: StatsProvider` - remote per-wallet stats fetches
/// - `P: SubscriptionService` - push-subscription registration
///
/// All mutations of the wallet collection go through one `RwLock`, so
/// add/remove/update appear atomic to readers and stats writes never
/// interleave. Fetches run outside the lock; a result arriving for a wallet
/// that was removed in the meantime is discarded by the collection.
pub struct TrackerClient<S: WalletStorage, A: StatsProvider, P: SubscriptionService> {
    config: Config,
    collection: Arc<RwLock<WalletCollection<S>>>,
    stats_api: Arc<A>,
    subscriptions: Arc<P>,
    last_error: Arc<RwLock<Option<String>>>,
}

impl StandardTrackerClient {
    /// Open a client with the standard disk/HTTP components built from the
    /// configuration.
    pub async fn open(config: Config) -> Result<Self> {
        config.validate()?;
        let storage = DiskWalletStorage::new(&config.storage_path).await?;
        let stats_api =
            HttpStatsClient::new(config.stats_base_url.as_str(), config.request_timeout)?;
        let subscriptions = HttpSubscriptionClient::new(
            config.subscription_base_url.as_str(),
            config.platform.as_str(),
            config.request_timeout,
        )?;
        Ok(Self::new(config, storage, stats_api, subscriptions))
    }
}

impl<S: WalletStorage, A: StatsProvider, P: SubscriptionService> TrackerClient<S, A, P> {
    /// Create a client from explicit components.
    pub fn new(config: Config, storage: S, stats_api: A, subscriptions: P) -> Self {
        Self {
            config,
            collection: Arc::new(RwLock::new(WalletCollection::new(storage))),
            stats_api: Arc::new(stats_api),
            subscriptions: Arc::new(subscriptions),
            last_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Load persisted wallets and, unless disabled, refresh all stats.
    pub async fn start(&self) -> Result<()> {
        self.collection.write().await.load().await?;
        if self.config.refresh_on_start {
            let summary = self.refresh_all().await;
            tracing::info!(
                refreshed = summary.refreshed,
                failed = summary.failed,
                "Initial stats refresh complete"
            );
        }
        Ok(())
    }

    /// Track a new wallet.
    ///
    /// The wallet is validated, inserted and persisted first; the
    /// best-effort subscribe and the initial stats fetch follow. Failures of
    /// either are reported as a warning on the outcome, never as an error:
    /// the wallet stays tracked.
    pub async fn add_wallet(
        &self,
        address: &str,
        name: Option<String>,
    ) -> Result<AddOutcome> {
        let entry = self.collection.write().await.add(address, name).await?;

        let mut warning = None;
        if let Err(e) = self.subscriptions.subscribe(address).await {
            tracing::warn!(address, error = %e, "Failed to subscribe wallet");
            warning = Some(e.to_string());
        }

        if let Err(e) = self.refresh_wallet(address).await {
            warning = Some(e.to_string());
        }

        Ok(AddOutcome {
            wallet: entry,
            warning,
        })
    }

    /// Stop tracking a wallet. Removal is final regardless of the
    /// best-effort unsubscribe outcome. Returns the removed entry, or `None`
    /// for an unknown id.
    pub async fn remove_wallet(&self, id: Uuid) -> Result<Option<WalletEntry>> {
        let Some(entry) = self.collection.write().await.remove(id).await? else {
            return Ok(None);
        };

        if let Err(e) = self.subscriptions.unsubscribe(&entry.address).await {
            tracing::warn!(address = %entry.address, error = %e, "Failed to unsubscribe wallet");
        }

        Ok(Some(entry))
    }

    /// Apply a patch to a wallet. Returns whether the id was known.
    pub async fn update_wallet(&self, id: Uuid, update: WalletUpdate) -> Result<bool> {
        self.collection.write().await.update(id, update).await
    }

    /// Refresh the stats snapshot for one wallet.
    ///
    /// On success the snapshot is applied unless the wallet was removed
    /// while the fetch was in flight, in which case the result is discarded;
    /// the return value reports whether it was applied. A fetch failure
    /// leaves the previous snapshot untouched and is recorded as the last
    /// error.
    pub async fn refresh_wallet(&self, address: &str) -> Result<bool> {
        match self.stats_api.wallet_stats(address).await {
            Ok(stats) => Ok(self.collection.write().await.set_stats(address, stats)),
            Err(e) => {
                tracing::warn!(address, error = %e, "Failed to fetch wallet stats");
                *self.last_error.write().await = Some(e.to_string());
                Err(TrackerError::Api(e))
            }
        }
    }

    /// Refresh stats for every tracked wallet.
    ///
    /// The address list is snapshotted at the start; each wallet's fetch
    /// resolves independently and its result is applied or reported on its
    /// own. One wallet's failure never prevents the others from updating.
    /// The summary is produced only after every fetch has resolved and
    /// carries the last failure message if any occurred.
    pub async fn refresh_all(&self) -> RefreshSummary {
        let addresses: Vec<String> = {
            let collection = self.collection.read().await;
            collection.wallets().iter().map(|w| w.address.clone()).collect()
        };

        if addresses.is_empty() {
            return RefreshSummary::default();
        }

        tracing::info!(count = addresses.len(), "Refreshing stats for all wallets");
        let mut summary = RefreshSummary::default();

        let stats_api = Arc::clone(&self.stats_api);
        let mut results = stream::iter(addresses)
            .map(|address| {
                let stats_api = Arc::clone(&stats_api);
                async move {
                    let result = stats_api.wallet_stats(&address).await;
                    (address, result)
                }
            })
            .buffer_unordered(self.config.max_concurrent_fetches);

        while let Some((address, result)) = results.next().await {
            match result {
                Ok(stats) => {
                    if self.collection.write().await.set_stats(&address, stats) {
                        summary.refreshed += 1;
                    }
                }
                Err(e) => {
                    tracing::warn!(address = %address, error = %e, "Failed to fetch wallet stats");
                    summary.failed += 1;
                    summary.last_error = Some(e.to_string());
                }
            }
        }

        *self.last_error.write().await = summary.last_error.clone();
        summary
    }

    /// Aggregate stats across all tracked wallets.
    pub async fn total(&self) -> WalletStats {
        self.collection.read().await.total()
    }

    /// Consistent read of the current entry list and stats map.
    pub async fn snapshot(
        &self,
    ) -> (Vec<WalletEntry>, std::collections::HashMap<String, WalletStats>) {
        self.collection.read().await.snapshot()
    }

    /// Look up a tracked wallet by address. Entry point used to focus a
    /// wallet referenced by an inbound push notification.
    pub async fn wallet_for_address(&self, address: &str) -> Option<WalletEntry> {
        self.collection.read().await.wallet_by_address(address).cloned()
    }

    /// Resolve the wallet an inbound notification payload refers to.
    pub async fn wallet_for_notification(
        &self,
        payload: &NotificationPayload,
    ) -> Option<WalletEntry> {
        self.wallet_for_address(&payload.wallet).await
    }

    /// Most recent fetch failure message, if any.
    pub async fn last_error(&self) -> Option<String> {
        self.last_error.read().await.clone()
    }

    /// Clear the recorded failure message.
    pub async fn clear_error(&self) {
        *self.last_error.write().await = None;
    }

    /// Client configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The stats provider component.
    pub fn stats_api(&self) -> &Arc<A> {
        &self.stats_api
    }

    /// The subscription service component, e.g. to supply a device token.
    pub fn subscriptions(&self) -> &Arc<P> {
        &self.subscriptions
    }
}
