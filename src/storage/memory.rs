//! In-memory storage implementation.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::{StorageError, StorageResult};
use crate::storage::{WalletStorage, WALLETS_KEY};
use crate::types::WalletEntry;

/// In-memory wallet storage. Contents do not survive the process; useful for
/// tests and ephemeral setups.
#[derive(Debug, Default)]
pub struct MemoryWalletStorage {
    metadata: HashMap<String, Vec<u8>>,
}

impl MemoryWalletStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WalletStorage for MemoryWalletStorage {
    async fn save_wallets(&mut self, wallets: &[WalletEntry]) -> StorageResult<()> {
        let serialized = serde_json::to_vec(wallets)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.metadata.insert(WALLETS_KEY.to_string(), serialized);
        Ok(())
    }

    async fn load_wallets(&self) -> StorageResult<Option<Vec<WalletEntry>>> {
        match self.metadata.get(WALLETS_KEY) {
            Some(data) => {
                let wallets = serde_json::from_slice(data)
                    .map_err(|e| StorageError::Serialization(e.to_string()))?;
                Ok(Some(wallets))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_storage_loads_none() {
        let storage = MemoryWalletStorage::new();
        assert!(storage.load_wallets().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let mut storage = MemoryWalletStorage::new();
        let wallets = vec![
            WalletEntry::new("Ag9CbunGvtQLi4iZxxYbXgASZUfH1SpL2ij9trRZwjDZ", None),
            WalletEntry::new("7dHbWXmci3dT8UFYWYZweBLXgycu7Y3iL6trKn1Y7ARj", Some("two".into())),
        ];
        storage.save_wallets(&wallets).await.unwrap();

        let loaded = storage.load_wallets().await.unwrap().unwrap();
        assert_eq!(loaded, wallets);
    }

    #[tokio::test]
    async fn test_save_replaces_previous_list() {
        let mut storage = MemoryWalletStorage::new();
        let first = vec![WalletEntry::new("Ag9CbunGvtQLi4iZxxYbXgASZUfH1SpL2ij9trRZwjDZ", None)];
        storage.save_wallets(&first).await.unwrap();
        storage.save_wallets(&[]).await.unwrap();

        let loaded = storage.load_wallets().await.unwrap().unwrap();
        assert!(loaded.is_empty());
    }
}
