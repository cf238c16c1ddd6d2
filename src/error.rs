//! Error types for the wallet tracker.

use thiserror::Error;

/// Main error type for the wallet tracker.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Subscription error: {0}")]
    Subscription(#[from] SubscriptionError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),
}

/// Local validation errors. These are rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Address length falls outside the accepted 32-44 character range.
    #[error("Invalid wallet address: {0}")]
    InvalidAddress(String),

    /// The address is already tracked.
    #[error("Wallet already added: {0}")]
    Duplicate(String),
}

/// Errors from the remote stats endpoint.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Endpoint construction produced an invalid URL. Should not occur for
    /// validated addresses.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// Connection failure or request timeout.
    #[error("Network error: {0}")]
    Transport(String),

    /// The remote signalled throttling (status 429).
    #[error("Rate limited. Please try again later.")]
    RateLimited,

    /// Any other non-2xx status.
    #[error("Server error: {0}")]
    Http(u16),

    /// The response body did not match the expected schema.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Returns a static string representing the error category.
    pub fn category(&self) -> &'static str {
        match self {
            ApiError::InvalidUrl(_) => "request",
            ApiError::Transport(_) => "transport",
            ApiError::RateLimited => "rate_limit",
            ApiError::Http(_) => "server",
            ApiError::Decode(_) => "decode",
        }
    }
}

/// Errors from the push-subscription endpoint. Always non-fatal to the
/// wallet operation that triggered them.
#[derive(Debug, Clone, Error)]
pub enum SubscriptionError {
    #[error("No device token available. Please enable notifications.")]
    NoDeviceToken,

    #[error("Failed to register for notifications (status {0})")]
    RegistrationFailed(u16),

    #[error("Failed to unsubscribe from notifications (status {0})")]
    UnsubscribeFailed(u16),

    #[error("Network error: {0}")]
    Transport(String),
}

/// Storage-related errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Logging-related errors.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log directory: {0}")]
    DirectoryCreation(#[from] std::io::Error),

    #[error("Subscriber initialization failed: {0}")]
    SubscriberInit(String),

    #[error("Log rotation failed: {0}")]
    RotationFailed(String),
}

/// Type alias for Result with TrackerError.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Type alias for stats API operation results.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Type alias for subscription operation results.
pub type SubscriptionResult<T> = std::result::Result<T, SubscriptionError>;

/// Type alias for storage operation results.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Type alias for logging operation results.
pub type LoggingResult<T> = std::result::Result<T, LoggingError>;
