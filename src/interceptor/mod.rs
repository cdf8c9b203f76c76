//! Conditional-caching (ETag) interceptor.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → policy.rs (read If-None-Match, request left untouched)
//!     → inner service (called exactly once)
//!     → layer.rs (buffer body up to the configured limit)
//!     → fingerprint.rs (server fingerprint from the materialized response)
//!     → policy.rs (decide NotModified / Modified / Unconditional, rewrite)
//!     → Response to caller
//! ```
//!
//! # Design Decisions
//! - No fingerprint store: every fingerprint is recomputed from content
//! - The fingerprinting strategy is injected, never a module-level constant
//! - Errors from the inner service or the strategy propagate; no error
//!   responses are fabricated here

pub mod error;
pub mod fingerprint;
pub mod layer;
pub mod policy;

pub use error::InterceptError;
pub use fingerprint::{ContentDigest, Fingerprint, FingerprintError, Fingerprinter, StaticFingerprint};
pub use layer::{EtagLayer, EtagService, InterceptorOptions};
pub use policy::{Decision, PolicyOptions};
