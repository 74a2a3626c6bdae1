//! Single-flight renewal coordinator
//!
//! Holds the renewal state (idle / in flight) and the queue of callers
//! waiting on the in-flight renewal. Both live behind one tokio Mutex: the
//! idle check and the transition to in flight happen under the same guard,
//! so two callers can never both start a renewal.
//!
//! The renewal itself runs on a spawned task. Every caller, including the
//! one that started it, waits on its own oneshot receiver; dropping a
//! caller's future therefore never strands the queue, and the queue is
//! drained exactly once per renewal.

use std::sync::Arc;
use std::time::Duration;

use common::Secret;
use session_auth::{Credential, Renewer, SessionStore};
use session_hooks::Timer;
use tokio::sync::{Mutex, oneshot};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::teardown::Teardown;

/// Retry policy for transient renewal failures (network errors, 408/429/5xx).
///
/// A rejected refresh token is never retried. The default performs no
/// retries, so any renewal failure ends the session.
#[derive(Debug, Clone, Copy)]
pub struct RenewalPolicy {
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each retry after that
    pub backoff: Duration,
}

impl Default for RenewalPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            backoff: Duration::from_millis(250),
        }
    }
}

impl RenewalPolicy {
    fn delay(&self, retry: u32) -> Duration {
        self.backoff.saturating_mul(2u32.saturating_pow(retry))
    }
}

type Waiter = oneshot::Sender<Result<Secret<String>>>;

#[derive(Default)]
struct RefreshState {
    in_flight: bool,
    waiters: Vec<Waiter>,
}

struct Inner {
    state: Mutex<RefreshState>,
    store: Arc<dyn SessionStore>,
    renewer: Arc<dyn Renewer>,
    teardown: Arc<Teardown>,
    timer: Arc<dyn Timer>,
    policy: RenewalPolicy,
}

/// Hands out renewed access tokens while issuing at most one renewal at a time.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct RefreshCoordinator {
    inner: Arc<Inner>,
}

impl RefreshCoordinator {
    pub fn new(
        store: Arc<dyn SessionStore>,
        renewer: Arc<dyn Renewer>,
        teardown: Arc<Teardown>,
        timer: Arc<dyn Timer>,
        policy: RenewalPolicy,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(RefreshState::default()),
                store,
                renewer,
                teardown,
                timer,
                policy,
            }),
        }
    }

    /// Obtain an access token newer than `rejected_access`.
    ///
    /// `rejected_access` is the token the caller's call was rejected with
    /// (`None` if the call carried no token). If the store already holds a
    /// different token, a renewal finished after that call was dispatched and
    /// its token is returned directly. If the store is empty although the
    /// call carried a token, the session already ended and the call fails
    /// without another teardown. Otherwise the caller joins the in-flight
    /// renewal, or starts one if none is running.
    pub async fn obtain_renewed_credential(
        &self,
        rejected_access: Option<&str>,
    ) -> Result<Secret<String>> {
        let receiver = {
            let mut state = self.inner.state.lock().await;
            let (sender, receiver) = oneshot::channel();

            if state.in_flight {
                state.waiters.push(sender);
                metrics::counter!("session_renewal_waiters_total").increment(1);
                debug!(waiters = state.waiters.len(), "renewal in flight, waiting on it");
            } else {
                match (self.inner.store.get().await, rejected_access) {
                    (Some(current), rejected)
                        if rejected != Some(current.access_token().as_str()) =>
                    {
                        debug!("session already renewed since dispatch, reusing current token");
                        return Ok(current.access_token().clone());
                    }
                    (None, Some(_)) => {
                        // Torn down or logged out after the call was sent;
                        // the user has already been sent back to login.
                        debug!("session ended since dispatch, not renewing");
                        return Err(session_auth::Error::MissingRefreshToken.into());
                    }
                    _ => {}
                }

                state.in_flight = true;
                state.waiters.push(sender);
                info!("session renewal started");
                tokio::spawn(Arc::clone(&self.inner).run_renewal());
            }
            receiver
        };

        receiver.await.unwrap_or(Err(Error::Abandoned))
    }

    /// Whether a renewal is currently in flight.
    pub async fn is_renewing(&self) -> bool {
        self.inner.state.lock().await.in_flight
    }

    /// Number of callers waiting on the in-flight renewal (including its initiator).
    pub async fn pending_waiters(&self) -> usize {
        self.inner.state.lock().await.waiters.len()
    }

    pub fn teardown(&self) -> &Arc<Teardown> {
        &self.inner.teardown
    }
}

impl Inner {
    /// Perform one renewal and release every waiter with its outcome.
    async fn run_renewal(self: Arc<Self>) {
        let renewed = self.renew_with_policy().await;

        let mut state = self.state.lock().await;
        let outcome = match renewed {
            Ok((sent_refresh, credential)) => {
                metrics::counter!("session_renewals_total", "outcome" => "success").increment(1);
                self.store_renewed(&sent_refresh, credential).await
            }
            Err(e) => {
                metrics::counter!("session_renewals_total", "outcome" => "failure").increment(1);
                self.teardown.run(&e).await;
                Err(e)
            }
        };
        state.in_flight = false;
        let waiters = std::mem::take(&mut state.waiters);
        drop(state);

        info!(
            waiters = waiters.len(),
            success = outcome.is_ok(),
            "session renewal finished"
        );
        for waiter in waiters {
            // A waiter whose caller went away has nobody to tell.
            let _ = waiter.send(outcome.clone());
        }
    }

    /// Write a renewed credential back unless the session was replaced or
    /// ended (login, logout) while the renewal was in flight.
    async fn store_renewed(
        &self,
        sent_refresh: &str,
        credential: Credential,
    ) -> Result<Secret<String>> {
        match self.store.set_if_current(sent_refresh, credential.clone()).await {
            Ok(Some(current)) => {
                if current != credential {
                    info!("session replaced during renewal, keeping the new session");
                }
                Ok(current.access_token().clone())
            }
            Ok(None) => {
                info!("session ended during renewal, discarding renewed token");
                Err(session_auth::Error::MissingRefreshToken.into())
            }
            Err(e) => {
                warn!(error = %e, "failed to persist renewed session");
                Ok(credential.access_token().clone())
            }
        }
    }

    /// Call the renewer, retrying transient failures per the policy.
    ///
    /// Returns the refresh token that was sent along with the renewed pair.
    async fn renew_with_policy(&self) -> Result<(String, Credential)> {
        let Some(current) = self.store.get().await else {
            return Err(session_auth::Error::MissingRefreshToken.into());
        };
        let refresh_token = current.refresh_token().as_str().to_string();

        let mut retry = 0u32;
        loop {
            match self.renew_once(refresh_token.clone()).await {
                Ok(renewed) => {
                    let credential = current
                        .renewed(renewed.access_token, renewed.refresh_token)
                        .ok_or_else(|| {
                            session_auth::Error::InvalidResponse(
                                "renewal returned an empty access token".into(),
                            )
                        })?;
                    return Ok((refresh_token, credential));
                }
                Err(e) if e.is_transient() && retry < self.policy.max_retries => {
                    let delay = self.policy.delay(retry);
                    retry += 1;
                    warn!(
                        error = %e,
                        retry,
                        delay_ms = delay.as_millis() as u64,
                        "transient renewal failure, retrying"
                    );
                    self.timer.sleep(delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// One renewal call on its own task, so a panicking renewer surfaces as
    /// an error instead of leaving the state in flight forever.
    async fn renew_once(
        &self,
        refresh_token: String,
    ) -> session_auth::Result<session_auth::RenewedToken> {
        let renewer = Arc::clone(&self.renewer);
        match tokio::spawn(async move { renewer.renew(&refresh_token).await }).await {
            Ok(result) => result,
            Err(e) => Err(session_auth::Error::InvalidResponse(format!(
                "renewal task failed: {e}"
            ))),
        }
    }
}
