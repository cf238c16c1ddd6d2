//! Aggregation of stats snapshots across wallets.

use crate::types::WalletStats;

/// Element-wise sum of all given snapshots.
///
/// Wallets with no snapshot simply do not appear in the input and therefore
/// contribute zero. An empty input yields the all-zero snapshot. Pure and
/// deterministic.
pub fn total_stats<'a, I>(stats: I) -> WalletStats
where
    I: IntoIterator<Item = &'a WalletStats>,
{
    stats.into_iter().fold(WalletStats::default(), |mut acc, s| {
        acc.total_earned += s.total_earned;
        acc.unclaimed_fees += s.unclaimed_fees;
        acc.claimed_fees += s.claimed_fees;
        acc.tokens_count += s.tokens_count;
        acc.positions_count += s.positions_count;
        acc
    })
}
