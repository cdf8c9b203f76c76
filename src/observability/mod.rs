//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Interceptor decisions:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (decision counters, buffered body sizes)
//!
//! Consumers:
//!     → stdout (tracing-subscriber fmt layer)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - RUST_LOG overrides the configured level
//! - Metrics go through the `metrics` facade; without an installed
//!   recorder they are no-ops

pub mod logging;
pub mod metrics;
