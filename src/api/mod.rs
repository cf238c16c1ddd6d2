//! Remote API clients: wallet stats and push-subscription endpoints.

mod stats;
mod subscriptions;

pub use stats::{HttpStatsClient, StatsProvider};
pub use subscriptions::{HttpSubscriptionClient, SubscriptionService};

use std::time::Duration;

/// Build an HTTP client with the given request timeout.
pub(crate) fn build_http_client(
    timeout: Duration,
) -> std::result::Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(timeout).build()
}
