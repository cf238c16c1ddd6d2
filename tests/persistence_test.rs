//! Tests for wallet-list persistence across restarts.

use bags_tracker::storage::{DiskWalletStorage, WalletStorage};
use bags_tracker::test_utils::{MockStatsProvider, MockSubscriptionService};
use bags_tracker::{Config, TrackerClient, WalletStats, WalletUpdate};
use tempfile::TempDir;

const ADDR_A: &str = "Ag9CbunGvtQLi4iZxxYbXgASZUfH1SpL2ij9trRZwjDZ";
const ADDR_B: &str = "7dHbWXmci3dT8UFYWYZweBLXgycu7Y3iL6trKn1Y7ARj";

async fn disk_client(
    dir: &TempDir,
) -> TrackerClient<DiskWalletStorage, MockStatsProvider, MockSubscriptionService> {
    TrackerClient::new(
        Config::new("http://localhost:3001").without_refresh_on_start(),
        DiskWalletStorage::new(dir.path()).await.unwrap(),
        MockStatsProvider::new(),
        MockSubscriptionService::new(),
    )
}

#[tokio::test]
async fn test_wallets_survive_restart_in_order() {
    let dir = TempDir::new().unwrap();

    let first = disk_client(&dir).await;
    first.stats_api().set_stats(ADDR_A, WalletStats::default());
    first.stats_api().set_stats(ADDR_B, WalletStats::default());
    let a = first.add_wallet(ADDR_A, Some("first".into())).await.unwrap().wallet;
    let b = first.add_wallet(ADDR_B, None).await.unwrap().wallet;
    first
        .update_wallet(b.id, WalletUpdate::default().with_notifications(false))
        .await
        .unwrap();
    drop(first);

    // Simulated restart: same storage path, fresh client.
    let second = disk_client(&dir).await;
    second.start().await.unwrap();

    let (wallets, stats) = second.snapshot().await;
    assert_eq!(wallets.len(), 2);
    assert_eq!(wallets[0].id, a.id);
    assert_eq!(wallets[0].address, ADDR_A);
    assert_eq!(wallets[0].name.as_deref(), Some("first"));
    assert_eq!(wallets[0].created_at, a.created_at);
    assert_eq!(wallets[1].id, b.id);
    assert!(!wallets[1].notifications_enabled);

    // Stats are perishable and start empty after restart until refreshed.
    assert!(stats.is_empty());
}

#[tokio::test]
async fn test_start_refreshes_persisted_wallets() {
    let dir = TempDir::new().unwrap();

    let first = disk_client(&dir).await;
    first.stats_api().set_stats(ADDR_A, WalletStats::default());
    first.add_wallet(ADDR_A, None).await.unwrap();
    drop(first);

    let second = TrackerClient::new(
        Config::new("http://localhost:3001"),
        DiskWalletStorage::new(dir.path()).await.unwrap(),
        MockStatsProvider::new(),
        MockSubscriptionService::new(),
    );
    let fetched = WalletStats {
        total_earned: 12.5,
        unclaimed_fees: 2.5,
        claimed_fees: 10.0,
        tokens_count: 1,
        positions_count: 1,
    };
    second.stats_api().set_stats(ADDR_A, fetched);

    // refresh_on_start is the default; start() rebuilds the stats map.
    second.start().await.unwrap();
    assert_eq!(second.total().await, fetched);
}

#[tokio::test]
async fn test_removal_is_persisted() {
    let dir = TempDir::new().unwrap();

    let first = disk_client(&dir).await;
    first.stats_api().set_stats(ADDR_A, WalletStats::default());
    let a = first.add_wallet(ADDR_A, None).await.unwrap().wallet;
    first.remove_wallet(a.id).await.unwrap();
    drop(first);

    let storage = DiskWalletStorage::new(dir.path()).await.unwrap();
    let stored = storage.load_wallets().await.unwrap().unwrap();
    assert!(stored.is_empty());
}
