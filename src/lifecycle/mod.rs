//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! Ctrl+C (signals.rs) ──┐
//!                       ├→ Shutdown::trigger (shutdown.rs)
//! Test harness ─────────┘      → HttpServer stops accepting, drains, returns
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
