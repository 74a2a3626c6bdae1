//! Configuration types and loading
//!
//! Config precedence: CLI args > env vars > config file > defaults.
//! Tokens never live in the TOML; they are kept in the session file at
//! `session.store_path`, written by `sessionctl login`.

use serde::Deserialize;
use session_auth::{DEFAULT_RENEWAL_PATH, SESSION_FILE_NAME};
use session_refresh::RenewalPolicy;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration
#[derive(Debug, Deserialize)]
pub struct Config {
    pub session: SessionConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub renewal: RenewalConfig,
    #[serde(default)]
    pub teardown: TeardownConfig,
}

/// Backend and session file location
#[derive(Debug, Deserialize)]
pub struct SessionConfig {
    pub base_url: String,
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Renewal endpoint and retry policy for transient renewal failures
#[derive(Debug, Deserialize)]
pub struct RenewalConfig {
    #[serde(default = "default_renewal_path")]
    pub path: String,
    #[serde(default)]
    pub max_retries: u32,
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

/// What the user sees when the session ends
#[derive(Debug, Deserialize)]
pub struct TeardownConfig {
    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,
    #[serde(default)]
    pub expired_message: Option<String>,
    #[serde(default)]
    pub generic_message: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for RenewalConfig {
    fn default() -> Self {
        Self {
            path: default_renewal_path(),
            max_retries: 0,
            backoff_ms: default_backoff_ms(),
        }
    }
}

impl Default for TeardownConfig {
    fn default() -> Self {
        Self {
            redirect_delay_ms: default_redirect_delay_ms(),
            expired_message: None,
            generic_message: None,
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from(SESSION_FILE_NAME)
}

fn default_timeout() -> u64 {
    30
}

fn default_renewal_path() -> String {
    DEFAULT_RENEWAL_PATH.to_string()
}

fn default_backoff_ms() -> u64 {
    250
}

fn default_redirect_delay_ms() -> u64 {
    1500
}

impl RenewalConfig {
    pub fn policy(&self) -> RenewalPolicy {
        RenewalPolicy {
            max_retries: self.max_retries,
            backoff: Duration::from_millis(self.backoff_ms),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, then overlay environment variables.
    ///
    /// `SESSIONCTL_BASE_URL` replaces `session.base_url`.
    pub fn load(path: &Path) -> common::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;

        if let Ok(base_url) = std::env::var("SESSIONCTL_BASE_URL") {
            config.session.base_url = base_url;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> common::Result<()> {
        if !self.session.base_url.starts_with("http://")
            && !self.session.base_url.starts_with("https://")
        {
            return Err(common::Error::Config(format!(
                "base_url must start with http:// or https://, got: {}",
                self.session.base_url
            )));
        }

        if !self.renewal.path.starts_with('/') {
            return Err(common::Error::Config(format!(
                "renewal path must start with '/', got: {}",
                self.renewal.path
            )));
        }

        if self.http.timeout_secs == 0 {
            return Err(common::Error::Config(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Resolve config file path from CLI arg or CONFIG_PATH env var.
    pub fn resolve_path(cli_path: Option<&str>) -> PathBuf {
        if let Some(p) = cli_path {
            return PathBuf::from(p);
        }
        if let Ok(p) = std::env::var("CONFIG_PATH") {
            return PathBuf::from(p);
        }
        PathBuf::from("sessionctl.toml")
    }
}
