//! Session metrics
//!
//! Counters recorded through the `metrics` facade. Nothing is exported from
//! here; the embedding application installs a recorder if it wants them.
//!
//! - `session_requests_total` (counter): label `outcome`
//! - `session_request_duration_seconds` (histogram): label `outcome`
//! - `session_replays_total` (counter)
//!
//! Renewal and teardown counters are recorded where those happen, in
//! `session-refresh`.

/// Record a finished call with its outcome label (`success` or a classification label).
pub fn record_request(outcome: &'static str, duration_secs: f64) {
    metrics::counter!("session_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("session_request_duration_seconds", "outcome" => outcome)
        .record(duration_secs);
}

/// Record a call replayed after a renewal.
pub fn record_replay() {
    metrics::counter!("session_replays_total").increment(1);
}
