//! Error types for guest list operations.

use thiserror::Error;

/// Errors that can occur while reading or updating the guest list.
#[derive(Error, Debug)]
pub enum GuestListError {
    #[error("Guest not found: {0}")]
    GuestNotFound(String),

    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GuestListError {
    /// True for lookups that matched no row.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GuestListError::GuestNotFound(_) | GuestListError::GroupNotFound(_)
        )
    }
}

/// Result type alias for guest list operations.
pub type GuestListResult<T> = Result<T, GuestListError>;
