//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use axum::body::Bytes;
use axum::http::Response;
use serde::{Deserialize, Serialize};

use crate::interceptor::{
    ContentDigest, Fingerprint, FingerprintError, Fingerprinter, InterceptorOptions, PolicyOptions,
};

/// Root configuration for the demo server.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Conditional-caching behaviour.
    pub cache: CacheConfig,

    /// Content served by the demo handler.
    pub content: ContentConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// How fingerprints are computed.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FingerprintStrategy {
    /// One fixed value for every response.
    Static { value: String },
    /// MD5 digest of the response body.
    Digest,
}

impl Default for FingerprintStrategy {
    fn default() -> Self {
        FingerprintStrategy::Static {
            value: "v1".to_string(),
        }
    }
}

impl Fingerprinter for FingerprintStrategy {
    fn fingerprint(&self, response: &Response<Bytes>) -> Result<Fingerprint, FingerprintError> {
        match self {
            FingerprintStrategy::Static { value } => Ok(Fingerprint::new(value.as_str())),
            FingerprintStrategy::Digest => ContentDigest.fingerprint(response),
        }
    }
}

/// Conditional-caching configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    pub strategy: FingerprintStrategy,

    /// Send `ETag` on 304 responses too.
    pub echo_etag_on_not_modified: bool,

    /// Largest response body buffered for fingerprinting, in bytes.
    /// Unbounded when omitted.
    pub max_body_bytes: Option<usize>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            strategy: FingerprintStrategy::default(),
            echo_etag_on_not_modified: false,
            max_body_bytes: None,
        }
    }
}

impl CacheConfig {
    pub fn interceptor_options(&self) -> InterceptorOptions {
        InterceptorOptions {
            policy: PolicyOptions {
                echo_etag_on_not_modified: self.echo_etag_on_not_modified,
            },
            max_body_bytes: self.max_body_bytes,
        }
    }
}

/// Content returned by the demo handler for every path.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ContentConfig {
    pub body: String,
    pub content_type: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            body: "<h1>Hello</h1>".to_string(),
            content_type: "text/html; charset=utf-8".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
