//! Metrics collection.
//!
//! # Metrics
//! - `sender_submissions_total` (counter): pipeline outcomes by result code
//! - `sender_pipeline_duration_seconds` (histogram): wall time per call
//!
//! No exporter is installed here; without a recorder these are no-ops.

use std::time::Duration;

/// Record one finished pipeline call.
pub fn record_outcome(code: i32, elapsed: Duration) {
    metrics::counter!("sender_submissions_total", "code" => code.to_string()).increment(1);
    metrics::histogram!("sender_pipeline_duration_seconds").record(elapsed.as_secs_f64());
}
