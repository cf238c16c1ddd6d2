//! Disk-based storage implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{StorageError, StorageResult};
use crate::storage::{WalletStorage, WALLETS_KEY};
use crate::types::WalletEntry;

/// Disk-based wallet storage.
///
/// The wallet list is kept as one JSON file under the base directory. Writes
/// go through a temp file followed by a rename, so a crash mid-write leaves
/// the previous list intact. Last write wins on the whole list; there is no
/// partial merge.
#[derive(Debug)]
pub struct DiskWalletStorage {
    base_path: PathBuf,
}

impl DiskWalletStorage {
    /// Open storage rooted at `base_path`, creating the directory if needed.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();
        tokio::fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create directory: {}", e))
        })?;
        Ok(Self {
            base_path,
        })
    }

    fn wallets_path(&self) -> PathBuf {
        self.base_path.join(format!("{}.json", WALLETS_KEY))
    }

    /// Base directory this storage writes under.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[async_trait]
impl WalletStorage for DiskWalletStorage {
    async fn save_wallets(&mut self, wallets: &[WalletEntry]) -> StorageResult<()> {
        let serialized = serde_json::to_vec_pretty(wallets)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let path = self.wallets_path();
        let tmp_path = path.with_extension("json.tmp");

        tokio::fs::write(&tmp_path, &serialized)
            .await
            .map_err(|e| StorageError::WriteFailed(format!("{}: {}", tmp_path.display(), e)))?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| StorageError::WriteFailed(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(count = wallets.len(), "Persisted wallet list");
        Ok(())
    }

    async fn load_wallets(&self) -> StorageResult<Option<Vec<WalletEntry>>> {
        let path = self.wallets_path();
        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::ReadFailed(format!("{}: {}", path.display(), e)));
            }
        };

        let wallets = serde_json::from_slice(&data)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(Some(wallets))
    }
}
