//! HTTP conditional caching (ETag) as a tower middleware.

pub mod config;
pub mod http;
pub mod interceptor;
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use interceptor::{
    ContentDigest, EtagLayer, EtagService, Fingerprint, FingerprintError, Fingerprinter,
    InterceptError, StaticFingerprint,
};
pub use lifecycle::Shutdown;
