//! Error types for credential storage and renewal

use session_hooks::ErrorClassification;

/// Errors from session storage and the renewal endpoint.
///
/// `Clone` so a single renewal outcome can be delivered to every caller
/// waiting on it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("refresh token rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("renewal endpoint returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("invalid renewal response: {0}")]
    InvalidResponse(String),

    #[error("no refresh token in session store")]
    MissingRefreshToken,

    #[error("credential parse error: {0}")]
    CredentialParse(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl Error {
    /// Whether retrying the same renewal could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Upstream { .. })
    }

    pub fn classification(&self) -> ErrorClassification {
        match self {
            Error::Http(_) | Error::Upstream { .. } => ErrorClassification::Transient,
            Error::Rejected { .. } | Error::InvalidResponse(_) | Error::MissingRefreshToken => {
                ErrorClassification::SessionInvalid
            }
            Error::CredentialParse(_) | Error::Io(_) => ErrorClassification::Other,
        }
    }
}

/// Result alias for session auth operations.
pub type Result<T> = std::result::Result<T, Error>;
