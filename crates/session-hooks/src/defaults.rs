//! Default collaborator implementations
//!
//! Used when the embedding application does not supply its own notifier,
//! navigator, or timer. The notifier and navigator only emit tracing events,
//! which is enough for headless clients and background jobs.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tracing::{info, warn};

use crate::{Navigator, Notifier, Timer};

/// Notifier that logs each message as a warning.
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        warn!(message, "user notification");
    }
}

/// Navigator that logs the redirect instead of performing one.
#[derive(Debug, Default, Clone)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn redirect_to_login(&self) {
        info!("session ended, redirect to login requested");
    }
}

/// Timer backed by `tokio::time::sleep`.
#[derive(Debug, Default, Clone)]
pub struct TokioTimer;

impl Timer for TokioTimer {
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + 'static>> {
        Box::pin(tokio::time::sleep(duration))
    }
}
