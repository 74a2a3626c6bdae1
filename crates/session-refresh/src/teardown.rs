//! Session teardown after an unrecoverable renewal failure
//!
//! Clears the session store, shows one "session expired" notification, and
//! after a short delay asks the navigator to return to login. The delay only
//! lets the notification render; it is measured by the injected `Timer` so
//! tests never wait on the wall clock.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use session_auth::SessionStore;
use session_hooks::{Navigator, Notifier, Timer};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::Error;

/// Notification shown when the session cannot be renewed.
pub const DEFAULT_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

/// Delay between the notification and the redirect.
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Ends the session and schedules the redirect to login.
pub struct Teardown {
    store: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    timer: Arc<dyn Timer>,
    redirect_delay: Duration,
    message: String,
    pending_redirect: Mutex<Option<JoinHandle<()>>>,
}

impl Teardown {
    pub fn new(
        store: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        timer: Arc<dyn Timer>,
    ) -> Self {
        Self {
            store,
            notifier,
            navigator,
            timer,
            redirect_delay: DEFAULT_REDIRECT_DELAY,
            message: DEFAULT_EXPIRED_MESSAGE.to_string(),
            pending_redirect: Mutex::new(None),
        }
    }

    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Tear the session down.
    ///
    /// A failure to clear the store is logged, not propagated: the session is
    /// unusable either way and the user still has to log in again. A redirect
    /// still pending from an earlier teardown is replaced, so back-to-back
    /// teardowns navigate once.
    pub async fn run(&self, reason: &Error) {
        warn!(error = %reason, "tearing down session");

        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "failed to clear session store during teardown");
        }

        self.notifier.notify(&self.message);

        let navigator = Arc::clone(&self.navigator);
        let delay = self.timer.sleep(self.redirect_delay);
        let handle = tokio::spawn(async move {
            delay.await;
            navigator.redirect_to_login();
        });
        if let Some(previous) = self.pending().replace(handle) {
            previous.abort();
        }

        metrics::counter!("session_teardowns_total").increment(1);
        info!(
            redirect_delay_ms = self.redirect_delay.as_millis() as u64,
            "session cleared, redirect to login scheduled"
        );
    }

    /// Cancel a redirect that has not fired yet (e.g. the user logged in again).
    ///
    /// Returns true if a pending redirect was cancelled.
    pub fn cancel_redirect(&self) -> bool {
        match self.pending().take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                debug!("pending redirect cancelled");
                true
            }
            _ => false,
        }
    }

    /// Wait for a scheduled redirect to fire. Returns immediately if none is pending.
    pub async fn wait_redirect(&self) {
        let handle = self.pending().take();
        if let Some(handle) = handle {
            // A cancelled redirect surfaces as a JoinError; nothing to report.
            let _ = handle.await;
        }
    }

    fn pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending_redirect
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
