//! Wallet tracking and fee-earnings stats synchronization.
//!
//! This library maintains a durable set of tracked wallet addresses and a
//! locally cached snapshot of each wallet's fee-earnings statistics, fetched
//! from a remote stats backend. It keeps a push-subscription registration in
//! step with the tracked set and aggregates per-wallet snapshots into a
//! total view. It can:
//!
//! - Track, edit and remove wallets with validated, de-duplicated addresses
//! - Persist the wallet list to disk and restore it on startup
//! - Fetch per-wallet stats concurrently with per-wallet failure isolation
//! - Register and deregister wallets against a push-subscription backend
//! - Aggregate all cached snapshots into one total
//!
//! # Quick Start
//!
//! ```no_run
//! use bags_tracker::{Config, StandardTrackerClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::new("https://bagstats.xyz")
//!         .with_storage_path("./.tmp/tracker-storage");
//!
//!     let client = StandardTrackerClient::open(config).await?;
//!     client.start().await?;
//!
//!     let outcome = client
//!         .add_wallet("Ag9CbunGvtQLi4iZxxYbXgASZUfH1SpL2ij9trRZwjDZ", None)
//!         .await?;
//!     println!("tracking {}", outcome.wallet.display_name());
//!     println!("total earned: {}", client.total().await.total_earned_usd());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The collection of tracked wallets is the single source of truth; the
//! client coordinates it with two stateless remote collaborators behind
//! trait seams ([`api::StatsProvider`], [`api::SubscriptionService`]) and a
//! pluggable storage backend ([`storage::WalletStorage`]). All collection
//! mutations are serialized behind one lock; remote fetches run outside it
//! and a fetch result arriving after its wallet was removed is discarded.

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub mod aggregate;
pub mod api;
pub mod client;
pub mod collection;
pub mod error;
pub mod logging;
pub mod storage;
pub mod types;

// Re-export main types for convenience
pub use client::{Config, StandardTrackerClient, TrackerClient};
pub use collection::{validate_address, WalletCollection};
pub use error::{
    ApiError, LoggingError, Result, StorageError, SubscriptionError, TrackerError, ValidationError,
};
pub use logging::{init_console_logging, init_logging, LogFileConfig, LoggingConfig, LoggingGuard};
pub use types::{
    AddOutcome, NotificationPayload, RefreshSummary, WalletEntry, WalletStats, WalletUpdate,
};

pub use tracing::level_filters::LevelFilter;
