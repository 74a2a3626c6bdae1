//! Session-aware HTTP client
//!
//! Wraps `reqwest` with the session lifecycle: every call carries the stored
//! access token, a call rejected with an expired token waits on a single
//! shared renewal and is replayed once, and an unrecoverable renewal failure
//! ends the session (clear, notify, redirect to login) exactly once.
//!
//! Call flow:
//! 1. Attach `Authorization: Bearer <access>` from the `SessionStore`
//! 2. Dispatch and classify the outcome
//! 3. Success → payload returned unchanged
//! 4. Expired → `RefreshCoordinator` renews (or joins the in-flight renewal),
//!    call replayed once with the new token
//! 5. Anything else → user notified, error returned to the caller

pub mod call;
pub mod config;
pub mod error;
pub mod metrics;
pub mod pipeline;

pub use call::{Call, Payload};
pub use config::SessionClientBuilder;
pub use error::{Error, Result};
pub use pipeline::SessionClient;
pub use reqwest::Method;
