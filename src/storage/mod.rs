//! Storage abstraction for the wallet tracker.
//!
//! Only the wallet entry list is durable. Stats snapshots are perishable and
//! are rebuilt by a refresh after restart, so no backend persists them.

mod disk;
mod memory;

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::WalletEntry;

pub use disk::DiskWalletStorage;
pub use memory::MemoryWalletStorage;

/// Well-known key under which the serialized wallet list is stored.
pub const WALLETS_KEY: &str = "tracked_wallets";

/// Durable storage for the tracked wallet list.
///
/// Implementations replace the whole serialized list on every save. Callers
/// serialize saves (the collection mutates under one exclusive lock), so a
/// backend never sees interleaved writers.
#[async_trait]
pub trait WalletStorage: Send + Sync {
    /// Replace the stored wallet list.
    async fn save_wallets(&mut self, wallets: &[WalletEntry]) -> StorageResult<()>;

    /// Load the stored wallet list. Returns `None` if nothing has been
    /// stored yet.
    async fn load_wallets(&self) -> StorageResult<Option<Vec<WalletEntry>>>;
}
