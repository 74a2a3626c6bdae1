//! sessionctl
//!
//! Command-line client for a bearer-token backend:
//! 1. `login` stores an access/refresh token pair in the session file
//! 2. `request` sends a call with the stored access token, renewing it and
//!    replaying the call once if the backend reports it expired
//! 3. `status` / `logout` inspect or clear the stored session

mod config;
mod console;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use session_auth::{FileSessionStore, SessionStore};
use session_client::{Call, Method, SessionClient};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::console::{ConsoleNavigator, ConsoleNotifier};

/// Bearer-token session client
#[derive(Parser, Debug)]
#[command(
    name = "sessionctl",
    version,
    about = "Call a bearer-token backend with a renewable session"
)]
struct Cli {
    /// Config file (falls back to CONFIG_PATH, then ./sessionctl.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Store a freshly issued token pair as the current session
    Login {
        access_token: String,
        refresh_token: String,
    },
    /// Clear the stored session
    Logout,
    /// Show whether a session is stored
    Status,
    /// Send a call with the stored access token
    Request {
        /// HTTP method (GET, POST, ...)
        #[arg(value_parser = parse_method)]
        method: Method,
        /// Path relative to the base URL, or an absolute URL
        path: String,
        /// JSON request body
        #[arg(value_parser = parse_json_body)]
        body: Option<serde_json::Value>,
    },
}

fn parse_method(raw: &str) -> std::result::Result<Method, String> {
    Method::from_str(&raw.to_ascii_uppercase()).map_err(|_| format!("invalid HTTP method: {raw}"))
}

fn parse_json_body(raw: &str) -> std::result::Result<serde_json::Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("request body must be valid JSON: {e}"))
}

fn build_client(config: &Config, store: Arc<dyn SessionStore>) -> Result<SessionClient> {
    let mut builder = SessionClient::builder(config.session.base_url.as_str())
        .renewal_path(config.renewal.path.as_str())
        .timeout(Duration::from_secs(config.http.timeout_secs))
        .renewal_policy(config.renewal.policy())
        .redirect_delay(Duration::from_millis(config.teardown.redirect_delay_ms))
        .store(store)
        .notifier(Arc::new(ConsoleNotifier))
        .navigator(Arc::new(ConsoleNavigator));
    if let Some(message) = &config.teardown.expired_message {
        builder = builder.expired_message(message.as_str());
    }
    if let Some(message) = &config.teardown.generic_message {
        builder = builder.generic_message(message.as_str());
    }
    builder.build().context("failed to build session client")
}

async fn execute(
    client: &SessionClient,
    store_path: &Path,
    command: Command,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Login {
            access_token,
            refresh_token,
        } => {
            client
                .login(access_token, refresh_token)
                .await
                .context("failed to store session")?;
            writeln!(out, "session stored at {}", store_path.display())?;
        }
        Command::Logout => {
            client.logout().await.context("failed to clear session")?;
            writeln!(out, "session cleared")?;
        }
        Command::Status => match client.credential().await {
            Some(_) => writeln!(out, "session: active ({})", store_path.display())?,
            None => writeln!(out, "session: none")?,
        },
        Command::Request { method, path, body } => {
            let mut call = Call::new(method, path);
            if let Some(body) = &body {
                call = call.json(body);
            }
            let result = client.send(call).await;
            // Let a scheduled redirect fire before the process exits
            client.settle().await;

            let payload = result.context("request failed")?;
            out.write_all(&payload.body)?;
            if !payload.body.ends_with(b"\n") {
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Stdout is reserved for response bodies; logs go to stderr as JSON
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    let config_path = Config::resolve_path(cli.config.as_deref());
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    info!(
        base_url = %config.session.base_url,
        store_path = %config.session.store_path.display(),
        timeout_secs = config.http.timeout_secs,
        max_renewal_retries = config.renewal.max_retries,
        "configuration loaded"
    );

    let store = FileSessionStore::load(config.session.store_path.clone())
        .await
        .with_context(|| {
            format!(
                "failed to load session from {}",
                config.session.store_path.display()
            )
        })?;
    let client = build_client(&config, Arc::new(store))?;

    execute(
        &client,
        &config.session.store_path,
        cli.command,
        &mut std::io::stdout(),
    )
    .await
}
