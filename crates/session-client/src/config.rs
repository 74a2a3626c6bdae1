//! Client construction
//!
//! Every collaborator has a default so the common case is
//! `SessionClient::builder("https://api.example.com").build()?`. Tests and
//! embedding applications swap in their own store, notifier, navigator,
//! timer, or renewer.

use std::sync::Arc;
use std::time::Duration;

use session_auth::{DEFAULT_RENEWAL_PATH, HttpRenewer, MemorySessionStore, Renewer, SessionStore};
use session_hooks::{
    DEFAULT_GENERIC_MESSAGE, Navigator, Notifier, Timer, TokioTimer, TracingNavigator,
    TracingNotifier,
};
use session_refresh::{
    DEFAULT_EXPIRED_MESSAGE, DEFAULT_REDIRECT_DELAY, RefreshCoordinator, RenewalPolicy, Teardown,
};
use tracing::debug;

use crate::error::{Error, Result};
use crate::pipeline::SessionClient;

/// Default transport timeout for every call, renewal included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct SessionClientBuilder {
    base_url: String,
    renewal_path: String,
    timeout: Duration,
    store: Option<Arc<dyn SessionStore>>,
    notifier: Option<Arc<dyn Notifier>>,
    navigator: Option<Arc<dyn Navigator>>,
    timer: Option<Arc<dyn Timer>>,
    renewer: Option<Arc<dyn Renewer>>,
    renewal_policy: RenewalPolicy,
    redirect_delay: Duration,
    expired_message: String,
    generic_message: String,
}

impl SessionClientBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            renewal_path: DEFAULT_RENEWAL_PATH.to_string(),
            timeout: DEFAULT_TIMEOUT,
            store: None,
            notifier: None,
            navigator: None,
            timer: None,
            renewer: None,
            renewal_policy: RenewalPolicy::default(),
            redirect_delay: DEFAULT_REDIRECT_DELAY,
            expired_message: DEFAULT_EXPIRED_MESSAGE.to_string(),
            generic_message: DEFAULT_GENERIC_MESSAGE.to_string(),
        }
    }

    /// Path of the renewal endpoint, relative to the base URL.
    pub fn renewal_path(mut self, path: impl Into<String>) -> Self {
        self.renewal_path = path.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn timer(mut self, timer: Arc<dyn Timer>) -> Self {
        self.timer = Some(timer);
        self
    }

    /// Replace the HTTP renewer. `renewal_path` is ignored when set.
    pub fn renewer(mut self, renewer: Arc<dyn Renewer>) -> Self {
        self.renewer = Some(renewer);
        self
    }

    pub fn renewal_policy(mut self, policy: RenewalPolicy) -> Self {
        self.renewal_policy = policy;
        self
    }

    pub fn redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    /// Notification shown when the session is torn down.
    pub fn expired_message(mut self, message: impl Into<String>) -> Self {
        self.expired_message = message.into();
        self
    }

    /// Notification shown when a failed call carries no usable message.
    pub fn generic_message(mut self, message: impl Into<String>) -> Self {
        self.generic_message = message.into();
        self
    }

    pub fn build(self) -> Result<SessionClient> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::InvalidConfig(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }
        if !self.renewal_path.starts_with('/') {
            return Err(Error::InvalidConfig(format!(
                "renewal_path must start with '/', got: {}",
                self.renewal_path
            )));
        }
        if self.timeout.is_zero() {
            return Err(Error::InvalidConfig("timeout must be greater than 0".into()));
        }

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::InvalidConfig(format!("building HTTP client: {e}")))?;

        let base_url = self.base_url.trim_end_matches('/').to_string();
        let renewer: Arc<dyn Renewer> = match self.renewer {
            Some(renewer) => renewer,
            None => Arc::new(HttpRenewer::new(
                http.clone(),
                format!("{base_url}{}", self.renewal_path),
            )),
        };
        let store: Arc<dyn SessionStore> = match self.store {
            Some(store) => store,
            None => Arc::new(MemorySessionStore::new()),
        };
        let notifier: Arc<dyn Notifier> = match self.notifier {
            Some(notifier) => notifier,
            None => Arc::new(TracingNotifier),
        };
        let navigator: Arc<dyn Navigator> = match self.navigator {
            Some(navigator) => navigator,
            None => Arc::new(TracingNavigator),
        };
        let timer: Arc<dyn Timer> = match self.timer {
            Some(timer) => timer,
            None => Arc::new(TokioTimer),
        };

        let teardown = Teardown::new(store.clone(), notifier.clone(), navigator, timer.clone())
            .with_redirect_delay(self.redirect_delay)
            .with_message(self.expired_message);
        let coordinator = RefreshCoordinator::new(
            store.clone(),
            renewer,
            Arc::new(teardown),
            timer,
            self.renewal_policy,
        );

        debug!(
            base_url = %base_url,
            timeout_secs = self.timeout.as_secs(),
            max_renewal_retries = self.renewal_policy.max_retries,
            "session client built"
        );

        Ok(SessionClient::from_parts(
            http,
            base_url,
            store,
            notifier,
            coordinator,
            self.generic_message,
        ))
    }
}
