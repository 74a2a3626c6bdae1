//! Single-flight session renewal and session teardown
//!
//! When any number of concurrent calls find their access token expired, the
//! `RefreshCoordinator` issues exactly one renewal call and hands its outcome
//! to every caller that asked while it was in flight. If the renewal fails,
//! the `Teardown` handler ends the session exactly once for the whole batch.
//!
//! Renewal cycle:
//! 1. First caller finds the coordinator idle → marks it in flight, spawns the renewal
//! 2. Later callers find it in flight → queue a waiter, no new renewal
//! 3. Renewal succeeds → credential stored, coordinator idle, every waiter gets the token
//! 4. Renewal fails → teardown (clear store, notify, redirect), coordinator idle,
//!    every waiter gets the same error

pub mod coordinator;
pub mod error;
pub mod teardown;

#[cfg(test)]
pub(crate) mod test_support;

pub use coordinator::{RefreshCoordinator, RenewalPolicy};
pub use error::{Error, Result};
pub use teardown::{DEFAULT_EXPIRED_MESSAGE, DEFAULT_REDIRECT_DELAY, Teardown};
