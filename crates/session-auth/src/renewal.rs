//! Renewal endpoint client
//!
//! Exchanges a refresh token for a new access token:
//!
//! ```text
//! POST <endpoint>            {"refreshToken": "..."}
//! 200                        {"accessToken": "...", "refreshToken"?: "..."}
//! ```
//!
//! The renewal call never carries an `Authorization` header; the refresh
//! token in the body is its only credential. Non-success statuses are
//! classified with `CallKind::Renewal`, so a 400/401/403 means the refresh
//! token is unusable while 408/429/5xx may be retried.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use session_hooks::{CallKind, ErrorClassification, classify_status, user_message};
use tracing::debug;

use crate::error::{Error, Result};

/// Successful response from the renewal endpoint.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewedToken {
    pub access_token: String,
    /// Present only when the server rotates refresh tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenewalRequest<'a> {
    refresh_token: &'a str,
}

/// Performs the renewal call.
///
/// Uses `Pin<Box<dyn Future>>` return types for dyn-compatibility
/// (`Arc<dyn Renewer>`), so tests can substitute a scripted renewer.
pub trait Renewer: Send + Sync {
    fn renew<'a>(
        &'a self,
        refresh_token: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<RenewedToken>> + Send + 'a>>;
}

/// Renewer that POSTs to an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpRenewer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRenewer {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Renewer for HttpRenewer {
    fn renew<'a>(
        &'a self,
        refresh_token: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<RenewedToken>> + Send + 'a>> {
        Box::pin(renew_token(&self.client, &self.endpoint, refresh_token))
    }
}

/// Exchange a refresh token for a new access token.
pub async fn renew_token(
    client: &reqwest::Client,
    endpoint: &str,
    refresh_token: &str,
) -> Result<RenewedToken> {
    let response = client
        .post(endpoint)
        .json(&RenewalRequest { refresh_token })
        .send()
        .await
        .map_err(|e| Error::Http(format!("renewal request failed: {e}")))?;

    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| Error::Http(format!("reading renewal response: {e}")))?;

    if let Some(classification) = classify_status(status.as_u16(), CallKind::Renewal) {
        let message = user_message(&body, status.canonical_reason().unwrap_or("no body"));
        debug!(status = status.as_u16(), classification = classification.label(), "renewal call failed");
        return Err(match classification {
            ErrorClassification::Transient => Error::Upstream {
                status: status.as_u16(),
                message,
            },
            _ => Error::Rejected {
                status: status.as_u16(),
                message,
            },
        });
    }

    let renewed: RenewedToken = serde_json::from_slice(&body)
        .map_err(|e| Error::InvalidResponse(format!("decoding renewal response: {e}")))?;
    if renewed.access_token.trim().is_empty() {
        return Err(Error::InvalidResponse(
            "renewal response carried an empty accessToken".into(),
        ));
    }
    Ok(renewed)
}
