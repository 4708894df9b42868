//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! pipeline stages produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (outcome counters, latency histogram)
//! ```

pub mod logging;
pub mod metrics;
