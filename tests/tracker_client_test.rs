//! Integration tests for the tracker client's wallet lifecycle operations.

use bags_tracker::storage::MemoryWalletStorage;
use bags_tracker::test_utils::{MockStatsProvider, MockSubscriptionService, SubscriptionCall};
use bags_tracker::{Config, SubscriptionError, TrackerClient, TrackerError, ValidationError, WalletStats};

const ADDR: &str = "Ag9CbunGvtQLi4iZxxYbXgASZUfH1SpL2ij9trRZwjDZ";

fn test_client(
) -> TrackerClient<MemoryWalletStorage, MockStatsProvider, MockSubscriptionService> {
    TrackerClient::new(
        Config::new("http://localhost:3001").without_refresh_on_start(),
        MemoryWalletStorage::new(),
        MockStatsProvider::new(),
        MockSubscriptionService::new(),
    )
}

fn sample_stats() -> WalletStats {
    WalletStats {
        total_earned: 100.0,
        unclaimed_fees: 40.0,
        claimed_fees: 60.0,
        tokens_count: 3,
        positions_count: 2,
    }
}

#[tokio::test]
async fn test_add_wallet_subscribes_and_fetches_stats() {
    let client = test_client();
    client.stats_api().set_stats(ADDR, sample_stats());

    let outcome = client.add_wallet(ADDR, None).await.expect("add should succeed");
    assert!(outcome.warning.is_none());
    assert_eq!(outcome.wallet.address, ADDR);
    assert_eq!(outcome.wallet.display_name(), "Ag9C...wjDZ");

    // Subscription registered and stats applied.
    assert_eq!(
        client.subscriptions().calls(),
        vec![SubscriptionCall::Subscribe(ADDR.to_string())]
    );
    assert_eq!(client.total().await, sample_stats());
}

#[tokio::test]
async fn test_add_wallet_scenario_total_and_removal() {
    // End-to-end lifecycle: add, fetch, total equals the snapshot, remove,
    // total is all zeros again.
    let client = test_client();
    client.stats_api().set_stats(ADDR, sample_stats());

    let outcome = client.add_wallet(ADDR, None).await.unwrap();
    assert_eq!(client.total().await, sample_stats());

    client.remove_wallet(outcome.wallet.id).await.unwrap();
    assert_eq!(client.total().await, WalletStats::default());
}

#[tokio::test]
async fn test_add_multibyte_address_and_display_it() {
    // Address validation counts characters, so a 32-character multibyte
    // address is accepted; displaying it must truncate by character too.
    let addr = "€".repeat(32);
    let client = test_client();
    client.stats_api().set_stats(&addr, sample_stats());

    let outcome = client.add_wallet(&addr, None).await.expect("add should succeed");
    assert_eq!(outcome.wallet.display_name(), "€€€€...€€€€");
}

#[tokio::test]
async fn test_add_duplicate_wallet_fails() {
    let client = test_client();
    client.stats_api().set_stats(ADDR, sample_stats());

    client.add_wallet(ADDR, None).await.unwrap();
    let err = client.add_wallet(ADDR, Some("again".into())).await.unwrap_err();
    assert!(matches!(err, TrackerError::Validation(ValidationError::Duplicate(_))));

    let (wallets, _) = client.snapshot().await;
    assert_eq!(wallets.len(), 1);
}

#[tokio::test]
async fn test_add_invalid_address_never_hits_network() {
    let client = test_client();

    let err = client.add_wallet("tooshort", None).await.unwrap_err();
    assert!(matches!(err, TrackerError::Validation(ValidationError::InvalidAddress(_))));

    assert!(client.stats_api().calls().is_empty());
    assert!(client.subscriptions().calls().is_empty());
}

#[tokio::test]
async fn test_subscription_failure_does_not_block_add() {
    let client = test_client();
    client.stats_api().set_stats(ADDR, sample_stats());
    client.subscriptions().fail_subscribe_with(SubscriptionError::NoDeviceToken);

    let outcome = client.add_wallet(ADDR, None).await.expect("add must still succeed");
    assert!(outcome.warning.is_some());

    // Wallet is tracked and stats were still fetched.
    assert!(client.wallet_for_address(ADDR).await.is_some());
    assert_eq!(client.total().await, sample_stats());
}

#[tokio::test]
async fn test_fetch_failure_on_add_is_a_warning() {
    let client = test_client();
    client.stats_api().set_error(ADDR, bags_tracker::ApiError::RateLimited);

    let outcome = client.add_wallet(ADDR, None).await.expect("add must still succeed");
    assert!(outcome.warning.unwrap().contains("Rate limited"));

    // Tracked, but no snapshot.
    assert!(client.wallet_for_address(ADDR).await.is_some());
    assert_eq!(client.total().await, WalletStats::default());
    assert!(client.last_error().await.is_some());
}

#[tokio::test]
async fn test_remove_is_final_despite_unsubscribe_failure() {
    let client = test_client();
    client.stats_api().set_stats(ADDR, sample_stats());
    client.subscriptions().fail_unsubscribe_with(SubscriptionError::UnsubscribeFailed(500));

    let outcome = client.add_wallet(ADDR, None).await.unwrap();
    let removed = client.remove_wallet(outcome.wallet.id).await.unwrap();
    assert_eq!(removed.unwrap().address, ADDR);

    assert!(client.wallet_for_address(ADDR).await.is_none());
    assert_eq!(client.total().await, WalletStats::default());
}

#[tokio::test]
async fn test_remove_unknown_id_is_noop() {
    let client = test_client();
    let removed = client.remove_wallet(uuid::Uuid::new_v4()).await.unwrap();
    assert!(removed.is_none());
    // No unsubscribe attempted for an unknown wallet.
    assert!(client.subscriptions().calls().is_empty());
}

#[tokio::test]
async fn test_update_wallet_patch() {
    let client = test_client();
    client.stats_api().set_stats(ADDR, sample_stats());
    let outcome = client.add_wallet(ADDR, None).await.unwrap();

    let applied = client
        .update_wallet(
            outcome.wallet.id,
            bags_tracker::WalletUpdate::default().with_name("Treasury").with_notifications(false),
        )
        .await
        .unwrap();
    assert!(applied);

    let entry = client.wallet_for_address(ADDR).await.unwrap();
    assert_eq!(entry.display_name(), "Treasury");
    assert!(!entry.notifications_enabled);
    assert_eq!(entry.id, outcome.wallet.id);
}

#[tokio::test]
async fn test_notification_payload_targets_wallet() {
    let client = test_client();
    client.stats_api().set_stats(ADDR, sample_stats());
    client.add_wallet(ADDR, Some("Main".into())).await.unwrap();

    let payload: bags_tracker::NotificationPayload = serde_json::from_str(&format!(
        r#"{{"wallet":"{}","tokenMint":"BONK","amountSol":0.1847,"amountUsd":46.18}}"#,
        ADDR
    ))
    .unwrap();

    let target = client.wallet_for_notification(&payload).await.unwrap();
    assert_eq!(target.display_name(), "Main");
}
