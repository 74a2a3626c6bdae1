//! Outcome classification and external collaborator seams
//!
//! Everything the session layer needs from the world outside HTTP lives here:
//! the `ErrorClassification` taxonomy and the classifier that produces it, plus
//! the three collaborator traits the session layer calls into:
//!
//! - `Notifier` shows a user-facing message (fire-and-forget)
//! - `Navigator` sends the user back to the login entry point
//! - `Timer` provides delays, injected so tests never wait on the wall clock
//!
//! `defaults` holds tracing-backed and tokio-backed implementations used when
//! the embedding application does not supply its own.

pub mod classify;
pub mod defaults;

pub use classify::{CallKind, DEFAULT_GENERIC_MESSAGE, classify_status, extract_message, user_message};
pub use defaults::{TokioTimer, TracingNavigator, TracingNotifier};

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Classification of a failed call, driving renew vs. replay vs. surface.
///
/// - SessionExpired is absorbed by the pipeline (renew + replay once)
/// - SessionInvalid means the refresh token is unusable; the session is torn down
/// - Transient and Other are surfaced to the caller with a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClassification {
    /// Access token rejected (401) on an ordinary call
    SessionExpired,
    /// Refresh token missing, expired, or rejected by the renewal endpoint
    SessionInvalid,
    /// Network failure, timeout, throttling, or 5xx
    Transient,
    /// Any other unsuccessful outcome (validation errors, 404, ...)
    Other,
}

impl ErrorClassification {
    /// Label for logging and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorClassification::SessionExpired => "session_expired",
            ErrorClassification::SessionInvalid => "session_invalid",
            ErrorClassification::Transient => "transient",
            ErrorClassification::Other => "other",
        }
    }
}

/// Shows a user-facing message. Must not block.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Redirects the user to the login entry point after the session is torn down.
pub trait Navigator: Send + Sync {
    fn redirect_to_login(&self);
}

/// Source of delays for backoff and the post-teardown redirect.
///
/// Returns a `'static` future so the sleep can be moved into a spawned task.
pub trait Timer: Send + Sync {
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + 'static>>;
}
