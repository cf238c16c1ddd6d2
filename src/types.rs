//! Common type definitions for the wallet tracker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum accepted wallet address length.
pub const MIN_ADDRESS_LEN: usize = 32;

/// Maximum accepted wallet address length.
pub const MAX_ADDRESS_LEN: usize = 44;

/// A tracked wallet.
///
/// The entry is durable configuration: it is persisted as part of the wallet
/// list on every mutation. `id`, `address` and `created_at` are fixed for the
/// entry's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletEntry {
    /// Stable unique identifier, generated at creation.
    pub id: Uuid,

    /// On-chain account address. Unique across all entries.
    pub address: String,

    /// Optional user-supplied label.
    pub name: Option<String>,

    /// Optional user-supplied avatar image bytes. Opaque to the tracker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_data: Option<Vec<u8>>,

    /// Whether push notifications are enabled for this wallet.
    pub notifications_enabled: bool,

    /// Creation time. Immutable.
    pub created_at: DateTime<Utc>,
}

impl WalletEntry {
    /// Create a new entry for the given address. The caller is responsible
    /// for address validation and de-duplication.
    pub fn new(address: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            address: address.into(),
            name,
            avatar_data: None,
            notifications_enabled: true,
            created_at: Utc::now(),
        }
    }

    /// Label shown for this wallet: the user-supplied name, falling back to
    /// the truncated address.
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.short_address())
    }

    /// Truncated address form: first 4 + "..." + last 4 characters.
    /// Addresses of 8 characters or fewer are returned whole.
    pub fn short_address(&self) -> String {
        // Validation counts characters, not bytes, so truncate the same way.
        let count = self.address.chars().count();
        if count <= 8 {
            return self.address.clone();
        }
        let head: String = self.address.chars().take(4).collect();
        let tail: String = self.address.chars().skip(count - 4).collect();
        format!("{}...{}", head, tail)
    }
}

/// Fee-earnings statistics for one wallet, as returned by the stats endpoint.
///
/// Monetary amounts are in USD. The upstream service computes
/// `total_earned ≈ unclaimed_fees + claimed_fees`; the tracker stores what is
/// returned without reconciling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletStats {
    pub total_earned: f64,
    pub unclaimed_fees: f64,
    pub claimed_fees: f64,
    pub tokens_count: u32,
    pub positions_count: u32,
}

impl WalletStats {
    /// Formatted total earned, e.g. `"$1,234.56"`.
    pub fn total_earned_usd(&self) -> String {
        format_usd(self.total_earned)
    }

    /// Formatted unclaimed fees.
    pub fn unclaimed_fees_usd(&self) -> String {
        format_usd(self.unclaimed_fees)
    }

    /// Formatted claimed fees.
    pub fn claimed_fees_usd(&self) -> String {
        format_usd(self.claimed_fees)
    }
}

/// Format a USD amount with two decimal places and thousands separators.
pub fn format_usd(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, frac)
}

/// Patch applied by a wallet update.
///
/// The outer `Option` selects whether a field is touched at all; for the
/// clearable fields the inner `Option` distinguishes "set" from "clear".
#[derive(Debug, Clone, Default)]
pub struct WalletUpdate {
    pub name: Option<Option<String>>,
    pub avatar_data: Option<Option<Vec<u8>>>,
    pub notifications_enabled: Option<bool>,
}

impl WalletUpdate {
    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(Some(name.into()));
        self
    }

    /// Clear the display name, falling back to the truncated address.
    pub fn clear_name(mut self) -> Self {
        self.name = Some(None);
        self
    }

    /// Replace the avatar image bytes.
    pub fn with_avatar(mut self, data: Vec<u8>) -> Self {
        self.avatar_data = Some(Some(data));
        self
    }

    /// Toggle push notifications.
    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.notifications_enabled = Some(enabled);
        self
    }
}

/// Outcome of a refresh-all operation.
///
/// Every tracked wallet's fetch resolves independently; the summary reports
/// how many snapshots were applied, how many fetches failed, and the most
/// recent failure message if any occurred.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefreshSummary {
    /// Number of wallets whose snapshot was updated.
    pub refreshed: usize,

    /// Number of wallets whose fetch failed. Their previous snapshot (or
    /// absence of one) is left untouched.
    pub failed: usize,

    /// Human-readable message of the last failure, if any.
    pub last_error: Option<String>,
}

impl RefreshSummary {
    /// True if every wallet's fetch succeeded.
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Outcome of adding a wallet.
///
/// Subscription and initial-fetch failures are non-fatal: the wallet is
/// tracked either way and the failure is surfaced here as a warning.
#[derive(Debug, Clone)]
pub struct AddOutcome {
    /// The newly tracked wallet.
    pub wallet: WalletEntry,

    /// Non-fatal warning from the best-effort subscribe or initial fetch.
    pub warning: Option<String>,
}

/// Inbound push-notification payload.
///
/// Produced by the remote service, consumed here only to target a wallet by
/// address.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    /// Address of the wallet the event concerns.
    pub wallet: String,

    /// Mint of the token the fee was earned in, if present.
    #[serde(default)]
    pub token_mint: Option<String>,

    #[serde(default)]
    pub amount_sol: Option<f64>,

    #[serde(default)]
    pub amount_usd: Option<f64>,
}
