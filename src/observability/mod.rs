//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! middleware, response builder, prop reaper produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters and gauges)
//!
//! Consumers:
//!     → stdout (fmt subscriber)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request id is attached to every request-scoped event
//! - Metric updates are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
