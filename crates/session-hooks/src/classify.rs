//! Error classification for backend responses
//!
//! Maps an HTTP status to an `ErrorClassification`, taking into account
//! whether the call was the renewal call itself: a 401 on an ordinary call
//! means the access token expired, while a 401 from the renewal endpoint
//! means the refresh token is no longer usable.
//!
//! Also extracts a best-effort user-facing message from an error body.

use crate::ErrorClassification;

/// Message shown when the response body carries nothing usable.
pub const DEFAULT_GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";

/// JSON fields searched (in order) for a user-facing message.
const MESSAGE_FIELDS: &[&str] = &["message", "error_description", "detail", "error"];

/// Plain-text bodies longer than this are assumed to be pages, not messages.
const MAX_PLAIN_MESSAGE_LEN: usize = 200;

/// Which kind of call produced the response being classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// An ordinary authenticated call
    Api,
    /// The renewal call that exchanges a refresh token for an access token
    Renewal,
}

/// Classify a response status.
///
/// Returns `None` for a successful outcome (anything below 400), whose
/// payload is passed through to the caller unchanged.
pub fn classify_status(status: u16, kind: CallKind) -> Option<ErrorClassification> {
    if status < 400 {
        return None;
    }
    let classification = match (status, kind) {
        (401, CallKind::Api) => ErrorClassification::SessionExpired,
        (400 | 401 | 403, CallKind::Renewal) => ErrorClassification::SessionInvalid,
        (408 | 429, _) => ErrorClassification::Transient,
        (500..=599, _) => ErrorClassification::Transient,
        _ => ErrorClassification::Other,
    };
    Some(classification)
}

/// Extract a user-facing message from an error response body.
///
/// JSON objects are searched for `message`, `error_description`, `detail`,
/// `error` (string or object with `message`), then `errors[0].message`.
/// Short plain-text bodies are used verbatim. HTML and empty bodies yield `None`.
pub fn extract_message(body: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(body).ok()?.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(text) {
        return message_from_json(&value);
    }

    if text.starts_with('<') || text.len() > MAX_PLAIN_MESSAGE_LEN {
        return None;
    }
    Some(text.to_string())
}

/// `extract_message`, falling back to `fallback` when nothing usable is found.
pub fn user_message(body: &[u8], fallback: &str) -> String {
    extract_message(body).unwrap_or_else(|| fallback.to_string())
}

fn message_from_json(value: &serde_json::Value) -> Option<String> {
    let object = value.as_object()?;

    for field in MESSAGE_FIELDS {
        match object.get(*field) {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => {
                return Some(s.trim().to_string());
            }
            Some(nested @ serde_json::Value::Object(_)) => {
                if let Some(message) = message_from_json(nested) {
                    return Some(message);
                }
            }
            _ => {}
        }
    }

    object
        .get("errors")
        .and_then(|errors| errors.as_array())
        .and_then(|errors| errors.first())
        .and_then(message_from_json)
}
