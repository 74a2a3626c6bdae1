//! Scripted collaborators for coordinator and teardown tests

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use session_auth::{Credential, RenewedToken, Renewer};
use session_hooks::{Navigator, Notifier, Timer};
use tokio::sync::Semaphore;

pub fn credential(access: &str, refresh: &str) -> Credential {
    Credential::new(access, refresh).unwrap()
}

pub fn renewed(access: &str) -> session_auth::Result<RenewedToken> {
    Ok(RenewedToken {
        access_token: access.into(),
        refresh_token: None,
    })
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
pub struct CountingNavigator {
    redirects: AtomicUsize,
}

impl CountingNavigator {
    pub fn count(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl Navigator for CountingNavigator {
    fn redirect_to_login(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}

/// Timer that returns immediately and records requested durations.
#[derive(Default)]
pub struct ImmediateTimer {
    slept: Mutex<Vec<Duration>>,
}

impl ImmediateTimer {
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

impl Timer for ImmediateTimer {
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + 'static>> {
        self.slept.lock().unwrap().push(duration);
        Box::pin(async {})
    }
}

/// Renewer that plays back scripted outcomes, optionally held at a gate.
///
/// Gated renewers block every call until `release()` so tests can pile up
/// waiters behind an in-flight renewal.
pub struct ScriptedRenewer {
    outcomes: Mutex<VecDeque<session_auth::Result<RenewedToken>>>,
    calls: AtomicUsize,
    seen_refresh_tokens: Mutex<Vec<String>>,
    gate: Option<Semaphore>,
    panic_on_call: bool,
}

impl ScriptedRenewer {
    pub fn new(outcomes: Vec<session_auth::Result<RenewedToken>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: AtomicUsize::new(0),
            seen_refresh_tokens: Mutex::new(Vec::new()),
            gate: None,
            panic_on_call: false,
        }
    }

    pub fn gated(outcomes: Vec<session_auth::Result<RenewedToken>>) -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new(outcomes)
        }
    }

    pub fn panicking() -> Self {
        Self {
            panic_on_call: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_refresh_tokens(&self) -> Vec<String> {
        self.seen_refresh_tokens.lock().unwrap().clone()
    }
}

impl Renewer for ScriptedRenewer {
    fn renew<'a>(
        &'a self,
        refresh_token: &'a str,
    ) -> Pin<Box<dyn Future<Output = session_auth::Result<RenewedToken>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen_refresh_tokens
                .lock()
                .unwrap()
                .push(refresh_token.to_string());
            if let Some(gate) = &self.gate {
                gate.acquire().await.unwrap().forget();
            }
            if self.panic_on_call {
                panic!("renewer blew up");
            }
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(session_auth::Error::Http("script exhausted".into())))
        })
    }
}
