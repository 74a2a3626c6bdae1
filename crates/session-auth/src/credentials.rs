//! The access/refresh credential pair
//!
//! Both tokens are held in `Secret` so they never show up in Debug output or
//! logs. A credential is either complete or absent: constructors and the
//! persisted form both refuse a pair with a missing or empty token.

use common::Secret;
use serde::{Deserialize, Serialize};

/// Access and refresh token for an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    access: Secret<String>,
    refresh: Secret<String>,
}

impl Credential {
    /// Build a credential. Returns `None` if either token is empty.
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Option<Self> {
        let access = access.into();
        let refresh = refresh.into();
        if access.trim().is_empty() || refresh.trim().is_empty() {
            return None;
        }
        Some(Self {
            access: Secret::new(access),
            refresh: Secret::new(refresh),
        })
    }

    /// Short-lived token attached to every call.
    pub fn access_token(&self) -> &Secret<String> {
        &self.access
    }

    /// Longer-lived token used only against the renewal endpoint.
    pub fn refresh_token(&self) -> &Secret<String> {
        &self.refresh
    }

    /// The credential that results from a successful renewal.
    ///
    /// The refresh token is replaced only when the server rotated it.
    pub fn renewed(&self, access: String, rotated_refresh: Option<String>) -> Option<Self> {
        let refresh = rotated_refresh
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| self.refresh.as_str().to_string());
        Self::new(access, refresh)
    }
}

/// On-disk form of a credential: `{"accessToken": "...", "refreshToken": "..."}`.
///
/// Both fields are optional on read so a half-written or hand-edited file
/// loads as "no session" instead of failing.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredCredential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl StoredCredential {
    /// Partial state is treated as absent.
    pub fn into_credential(self) -> Option<Credential> {
        match (self.access_token, self.refresh_token) {
            (Some(access), Some(refresh)) => Credential::new(access, refresh),
            _ => None,
        }
    }
}

impl From<&Credential> for StoredCredential {
    fn from(credential: &Credential) -> Self {
        Self {
            access_token: Some(credential.access.as_str().to_string()),
            refresh_token: Some(credential.refresh.as_str().to_string()),
        }
    }
}
