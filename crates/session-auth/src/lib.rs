//! Session credentials, storage, and renewal
//!
//! Provides the credential pair held for an authenticated session, the
//! `SessionStore` seam with in-memory and file-backed implementations, and
//! the client for the renewal endpoint that trades a refresh token for a new
//! access token. This crate knows nothing about request replay or
//! coordination; it is usable on its own.
//!
//! Credential flow:
//! 1. Login stores a `Credential` via `SessionStore::set()`
//! 2. Every call reads the access token via `SessionStore::get()`
//! 3. On expiry, `Renewer::renew()` exchanges the refresh token
//! 4. The renewed pair is written back via `SessionStore::set_if_current()`,
//!    unless a login or logout replaced the session in the meantime
//! 5. Logout or an unusable refresh token ends in `SessionStore::clear()`

pub mod constants;
pub mod credentials;
pub mod error;
pub mod renewal;
pub mod store;

pub use constants::*;
pub use credentials::Credential;
pub use error::{Error, Result};
pub use renewal::{HttpRenewer, RenewedToken, Renewer, renew_token};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
