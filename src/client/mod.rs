//! Tracker client: configuration and the orchestrating core.

mod config;
mod core;

pub use config::{Config, DEFAULT_MAX_CONCURRENT_FETCHES};
pub use core::{StandardTrackerClient, TrackerClient};
