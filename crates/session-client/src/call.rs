//! Outgoing calls and their payloads

use bytes::Bytes;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// A logical call through the session pipeline.
///
/// Built like a `reqwest::RequestBuilder`: builder errors (bad header, body
/// that fails to serialize) are held and reported when the call is sent.
/// The call is cloned for its replay, so the body is kept as `Bytes`.
#[derive(Debug, Clone)]
pub struct Call {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Option<Bytes>,
    invalid: Option<String>,
    replayed: bool,
}

impl Call {
    /// `path` is joined onto the client's base URL unless it is already an
    /// absolute `http://` or `https://` URL.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: None,
            invalid: None,
            replayed: false,
        }
    }

    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => {
                self.headers
                    .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                self.body = Some(Bytes::from(body));
            }
            Err(e) => self.invalidate(format!("serializing JSON body: {e}")),
        }
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        let name = match HeaderName::from_bytes(name.as_bytes()) {
            Ok(name) => name,
            Err(e) => {
                self.invalidate(format!("header name {name:?}: {e}"));
                return self;
            }
        };
        match HeaderValue::from_str(value) {
            Ok(value) => {
                self.headers.insert(name, value);
            }
            Err(e) => self.invalidate(format!("header {name}: {e}")),
        }
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub(crate) fn body_bytes(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Whether this is the replay of a call already rejected as expired.
    pub fn is_replay(&self) -> bool {
        self.replayed
    }

    /// The copy of this call to dispatch after a renewal.
    pub(crate) fn to_replay(&self) -> Self {
        Self {
            replayed: true,
            ..self.clone()
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match &self.invalid {
            Some(reason) => Err(Error::InvalidRequest(reason.clone())),
            None => Ok(()),
        }
    }

    fn invalidate(&mut self, reason: String) {
        // First error wins
        if self.invalid.is_none() {
            self.invalid = Some(reason);
        }
    }
}

/// A successful response, returned to the caller unchanged.
#[derive(Debug, Clone)]
pub struct Payload {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Payload {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| Error::Decode(e.to_string()))
    }

    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec()).map_err(|e| Error::Decode(e.to_string()))
    }
}
