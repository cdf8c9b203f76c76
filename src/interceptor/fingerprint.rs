//! Fingerprint values and the strategies that compute them.

use axum::body::Bytes;
use axum::http::{HeaderValue, Response};
use std::fmt;
use thiserror::Error;

/// Opaque identifier of one version of a response's content.
///
/// Compared with exact string equality; no weak/strong distinction is made.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to a header value suitable for the `ETag` response header.
    pub fn to_header_value(&self) -> Result<HeaderValue, FingerprintError> {
        HeaderValue::from_str(&self.0)
            .map_err(|_| FingerprintError::InvalidHeaderValue(self.0.clone()))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Fingerprint {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Fingerprint {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Errors raised while fingerprinting a response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FingerprintError {
    /// The computed fingerprint cannot be carried in an HTTP header.
    #[error("fingerprint {0:?} is not a valid header value")]
    InvalidHeaderValue(String),

    /// A caller-supplied strategy failed.
    #[error("fingerprint strategy failed: {0}")]
    Strategy(String),
}

/// Strategy computing a [`Fingerprint`] from a materialized response.
///
/// Implementations must be deterministic for equal content. Any closure
/// `Fn(&Response<Bytes>) -> Result<Fingerprint, FingerprintError>` qualifies.
pub trait Fingerprinter: Send + Sync {
    fn fingerprint(&self, response: &Response<Bytes>) -> Result<Fingerprint, FingerprintError>;
}

impl<F> Fingerprinter for F
where
    F: Fn(&Response<Bytes>) -> Result<Fingerprint, FingerprintError> + Send + Sync,
{
    fn fingerprint(&self, response: &Response<Bytes>) -> Result<Fingerprint, FingerprintError> {
        self(response)
    }
}

/// Returns the same fingerprint for every response.
///
/// Only correct when the content never changes for the lifetime of the
/// process; useful for tests and for content versioned out of band.
#[derive(Debug, Clone)]
pub struct StaticFingerprint(Fingerprint);

impl StaticFingerprint {
    pub fn new(value: impl Into<Fingerprint>) -> Self {
        Self(value.into())
    }
}

impl Fingerprinter for StaticFingerprint {
    fn fingerprint(&self, _response: &Response<Bytes>) -> Result<Fingerprint, FingerprintError> {
        Ok(self.0.clone())
    }
}

/// Content-derived fingerprint: the quoted lowercase hex MD5 of the body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentDigest;

impl ContentDigest {
    pub fn new() -> Self {
        Self
    }

    /// Digest of arbitrary content, in the same form as [`Fingerprinter::fingerprint`].
    pub fn compute<T: AsRef<[u8]>>(content: T) -> Fingerprint {
        let mut context = md5::Context::new();
        context.consume(content.as_ref());
        let digest = context.finalize();
        Fingerprint(format!("\"{:x}\"", digest))
    }
}

impl Fingerprinter for ContentDigest {
    fn fingerprint(&self, response: &Response<Bytes>) -> Result<Fingerprint, FingerprintError> {
        Ok(Self::compute(response.body()))
    }
}
