//! Error types for session renewal

use session_hooks::ErrorClassification;

/// Errors delivered to callers waiting on a renewal.
///
/// `Clone` because one outcome is delivered to every waiter.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("session renewal failed: {0}")]
    RenewalFailed(#[from] session_auth::Error),

    #[error("session renewal was abandoned before completing")]
    Abandoned,
}

impl Error {
    pub fn classification(&self) -> ErrorClassification {
        match self {
            Error::RenewalFailed(e) => e.classification(),
            Error::Abandoned => ErrorClassification::Transient,
        }
    }
}

/// Result alias for renewal operations.
pub type Result<T> = std::result::Result<T, Error>;
