//! The authoritative collection of tracked wallets.

use std::collections::HashMap;

use crate::aggregate;
use crate::error::{Result, ValidationError};
use crate::storage::WalletStorage;
use crate::types::{WalletEntry, WalletStats, WalletUpdate, MAX_ADDRESS_LEN, MIN_ADDRESS_LEN};
use uuid::Uuid;

/// Validate a wallet address string.
///
/// Only the length is checked (32-44 characters, the Solana address range).
/// The remote service is the authority on whether the address exists.
pub fn validate_address(address: &str) -> std::result::Result<(), ValidationError> {
    let len = address.chars().count();
    if !(MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN).contains(&len) {
        return Err(ValidationError::InvalidAddress(address.to_string()));
    }
    Ok(())
}

/// Single source of truth for tracked wallets and their last-known stats.
///
/// Owns the insertion-ordered entry list and the per-address stats map.
/// The entry list is persisted through the storage backend on every
/// mutation; stats are perishable and never persisted. Callers wrap the
/// collection in one exclusive lock, which serializes mutations and keeps
/// every read of (entries, stats) consistent.
pub struct WalletCollection<S: WalletStorage> {
    entries: Vec<WalletEntry>,
    stats: HashMap<String, WalletStats>,
    storage: S,
}

impl<S: WalletStorage> WalletCollection<S> {
    /// Create an empty collection over the given storage backend.
    pub fn new(storage: S) -> Self {
        Self {
            entries: Vec::new(),
            stats: HashMap::new(),
            storage,
        }
    }

    /// Load the persisted entry list from storage, replacing the in-memory
    /// list. Stats start empty and are rebuilt by refresh.
    pub async fn load(&mut self) -> Result<()> {
        if let Some(wallets) = self.storage.load_wallets().await? {
            tracing::info!(count = wallets.len(), "Loaded tracked wallets from storage");
            self.entries = wallets;
            self.stats.clear();
        }
        Ok(())
    }

    /// Track a new wallet.
    ///
    /// Validates the address and rejects duplicates before touching storage.
    /// The updated entry list is persisted before this returns; a storage
    /// failure rolls the insert back.
    pub async fn add(&mut self, address: &str, name: Option<String>) -> Result<WalletEntry> {
        validate_address(address)?;
        if self.entries.iter().any(|w| w.address == address) {
            return Err(ValidationError::Duplicate(address.to_string()).into());
        }

        let entry = WalletEntry::new(address, name);
        self.entries.push(entry.clone());

        if let Err(e) = self.storage.save_wallets(&self.entries).await {
            self.entries.pop();
            return Err(e.into());
        }

        tracing::info!(address, id = %entry.id, "Added wallet");
        Ok(entry)
    }

    /// Stop tracking a wallet by id. Removes its stats snapshot as well, so
    /// no orphaned snapshot survives. No-op for an unknown id.
    pub async fn remove(&mut self, id: Uuid) -> Result<Option<WalletEntry>> {
        let Some(pos) = self.entries.iter().position(|w| w.id == id) else {
            return Ok(None);
        };

        let entry = self.entries.remove(pos);
        self.stats.remove(&entry.address);
        self.storage.save_wallets(&self.entries).await?;

        tracing::info!(address = %entry.address, %id, "Removed wallet");
        Ok(Some(entry))
    }

    /// Apply a patch to a wallet. Only the supplied fields change; id,
    /// address and creation time are preserved. No-op for an unknown id.
    pub async fn update(&mut self, id: Uuid, update: WalletUpdate) -> Result<bool> {
        let Some(entry) = self.entries.iter_mut().find(|w| w.id == id) else {
            return Ok(false);
        };

        if let Some(name) = update.name {
            entry.name = name;
        }
        if let Some(avatar) = update.avatar_data {
            entry.avatar_data = avatar;
        }
        if let Some(enabled) = update.notifications_enabled {
            entry.notifications_enabled = enabled;
        }

        self.storage.save_wallets(&self.entries).await?;
        Ok(true)
    }

    /// Replace the stats snapshot for `address`.
    ///
    /// Silently discarded if the address is no longer tracked: an in-flight
    /// fetch result arriving after removal must not resurrect the wallet's
    /// stats. Returns whether the snapshot was applied.
    pub fn set_stats(&mut self, address: &str, stats: WalletStats) -> bool {
        if !self.entries.iter().any(|w| w.address == address) {
            tracing::debug!(address, "Discarding stats for untracked wallet");
            return false;
        }
        self.stats.insert(address.to_string(), stats);
        true
    }

    /// Consistent read of the current state: the ordered entry list and the
    /// per-address stats map.
    pub fn snapshot(&self) -> (Vec<WalletEntry>, HashMap<String, WalletStats>) {
        (self.entries.clone(), self.stats.clone())
    }

    /// Aggregate stats across all wallets with a snapshot.
    pub fn total(&self) -> WalletStats {
        aggregate::total_stats(self.stats.values())
    }

    /// Tracked wallet entries, in insertion order.
    pub fn wallets(&self) -> &[WalletEntry] {
        &self.entries
    }

    /// Stats snapshot for one address, if fetched.
    pub fn stats_for(&self, address: &str) -> Option<&WalletStats> {
        self.stats.get(address)
    }

    /// Look up a wallet entry by id.
    pub fn wallet_by_id(&self, id: Uuid) -> Option<&WalletEntry> {
        self.entries.iter().find(|w| w.id == id)
    }

    /// Look up a wallet entry by address.
    pub fn wallet_by_address(&self, address: &str) -> Option<&WalletEntry> {
        self.entries.iter().find(|w| w.address == address)
    }

    /// Number of tracked wallets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no wallets are tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
