//! Wire constants shared by the session layer

/// Default path of the renewal endpoint, relative to the API base URL.
pub const DEFAULT_RENEWAL_PATH: &str = "/auth/refresh-token";

/// Scheme prefix of the `Authorization` header value.
pub const BEARER_PREFIX: &str = "Bearer ";

/// File name used for the persisted session when only a directory is known.
pub const SESSION_FILE_NAME: &str = "session.json";
