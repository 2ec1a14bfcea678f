//! Metrics collection.
//!
//! # Metrics
//! - `json_join_fetch_attempts_total` (counter): GET attempts, retries included
//! - `json_join_fetch_defaulted_total` (counter): legs that fell back to their default, by reason
//! - `json_join_deliveries_total` (counter): joins delivered to a consumer
//! - `json_join_cancelled_total` (counter): joins cancelled before delivery

pub const FETCH_ATTEMPTS: &str = "json_join_fetch_attempts_total";
pub const FETCH_DEFAULTED: &str = "json_join_fetch_defaulted_total";
pub const DELIVERIES: &str = "json_join_deliveries_total";
pub const CANCELLED: &str = "json_join_cancelled_total";

pub fn record_attempt() {
    metrics::counter!(FETCH_ATTEMPTS).increment(1);
}

pub fn record_defaulted(reason: &'static str) {
    metrics::counter!(FETCH_DEFAULTED, "reason" => reason).increment(1);
}

pub fn record_delivery() {
    metrics::counter!(DELIVERIES).increment(1);
}

pub fn record_cancelled() {
    metrics::counter!(CANCELLED).increment(1);
}
