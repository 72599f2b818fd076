//! Error types for the application.

use thiserror::Error;

/// Filter pattern errors.
///
/// Pattern compilation failure is never fatal; callers log it and keep
/// the filter store unchanged.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid filter pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },
}

/// Notification delivery errors.
///
/// Delivery is fire-and-forget at the routing layer; failures are logged
/// and never propagate out of the event loop.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to reach the notification service: {0}")]
    Http(#[from] reqwest::Error),

    #[error("notification service rejected the request: {status}")]
    Rejected { status: reqwest::StatusCode },
}

/// Result type alias for filter operations.
pub type FilterResult<T> = std::result::Result<T, FilterError>;

/// Result type alias for notification operations.
pub type NotifyResult<T> = std::result::Result<T, NotifyError>;
