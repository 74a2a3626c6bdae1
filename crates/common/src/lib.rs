//! Shared building blocks for the session-relay workspace
//!
//! Holds the configuration error type used by every config loader and the
//! `Secret` wrapper that keeps session tokens out of logs.

mod error;
mod secret;

pub use error::{Error, Result};
pub use secret::Secret;
