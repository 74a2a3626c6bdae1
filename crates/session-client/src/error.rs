//! Error types for session-aware calls

use bytes::Bytes;
use session_hooks::{CallKind, ErrorClassification, classify_status};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The server answered with an unsuccessful status
    #[error("request failed with status {status}: {message}")]
    Status {
        status: u16,
        message: String,
        body: Bytes,
    },

    /// No response was received (connection, timeout, body read)
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The replayed call was rejected as expired again
    #[error("access token rejected again after renewal")]
    DoubleExpiry,

    /// The session could not be renewed and has been torn down
    #[error(transparent)]
    Session(#[from] session_refresh::Error),

    /// Login or logout could not update the session store
    #[error("session store error: {0}")]
    Store(session_auth::Error),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl Error {
    pub fn classification(&self) -> ErrorClassification {
        match self {
            Error::Status { status, .. } => {
                classify_status(*status, CallKind::Api).unwrap_or(ErrorClassification::Other)
            }
            Error::Transport { .. } => ErrorClassification::Transient,
            Error::DoubleExpiry => ErrorClassification::SessionExpired,
            Error::Session(e) => e.classification(),
            Error::Store(_)
            | Error::InvalidRequest(_)
            | Error::InvalidConfig(_)
            | Error::Decode(_) => {
                ErrorClassification::Other
            }
        }
    }

    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result alias for session-aware calls.
pub type Result<T> = std::result::Result<T, Error>;
