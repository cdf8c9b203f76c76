//! Interceptor error type.

use axum::BoxError;
use thiserror::Error;

use super::fingerprint::FingerprintError;

/// Errors surfaced by [`EtagService`](super::EtagService).
///
/// None of these are turned into responses here; mapping them to a 5xx is
/// the job of whatever serves the interceptor.
#[derive(Debug, Error)]
pub enum InterceptError<E> {
    /// The wrapped service failed. Carried unchanged; no fingerprint was computed.
    #[error("inner service failed: {0}")]
    Handler(E),

    /// The wrapped service's response body failed while being read.
    #[error("inner response body failed: {0}")]
    HandlerBody(BoxError),

    /// The response body exceeded the configured buffering limit.
    #[error("response body exceeds the {limit} byte buffering limit")]
    BodyTooLarge { limit: usize },

    /// The fingerprint strategy failed on a well-formed response.
    #[error(transparent)]
    Fingerprint(#[from] FingerprintError),
}

impl<E> InterceptError<E> {
    /// Recover the wrapped service's own error, if that is what this is.
    pub fn into_handler_error(self) -> Option<E> {
        match self {
            InterceptError::Handler(e) => Some(e),
            _ => None,
        }
    }

    /// Whether the wrapped service itself returned this error.
    pub fn is_handler(&self) -> bool {
        matches!(self, InterceptError::Handler(_))
    }
}
