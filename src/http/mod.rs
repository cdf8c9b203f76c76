//! HTTP serving for the demo binary.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, TraceLayer)
//!     → HandleErrorLayer (interceptor errors → 500)
//!     → EtagLayer (conditional caching)
//!     → content handler (configured body)
//! ```

pub mod server;

pub use server::HttpServer;
