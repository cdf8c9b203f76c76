//! Conditional-request decision and response rewriting.
//!
//! Synchronous and side-effect free; the service in `layer.rs` is only
//! plumbing around these functions.

use axum::body::Bytes;
use axum::http::{header, HeaderMap, Response, StatusCode};

use super::fingerprint::{Fingerprint, FingerprintError};

/// Outcome of comparing the client's fingerprint against the server's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Client fingerprint present and equal to the server fingerprint.
    NotModified,
    /// Client fingerprint present but stale.
    Modified,
    /// Request carried no (usable) client fingerprint.
    Unconditional,
}

impl Decision {
    /// Label used for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::NotModified => "not_modified",
            Decision::Modified => "modified",
            Decision::Unconditional => "unconditional",
        }
    }
}

/// Response rewriting options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyOptions {
    /// Carry the `ETag` header on 304 responses as well.
    pub echo_etag_on_not_modified: bool,
}

/// Read the client-presented fingerprint from `If-None-Match`.
///
/// A missing header and a value that is not visible ASCII are both treated
/// as "no fingerprint".
pub fn client_fingerprint(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
}

pub fn decide(client: Option<&str>, server: &Fingerprint) -> Decision {
    match client {
        Some(client) if client == server.as_str() => Decision::NotModified,
        Some(_) => Decision::Modified,
        None => Decision::Unconditional,
    }
}

/// Produce the response returned to the caller.
///
/// On a match the materialized response is dropped and a new, empty 304 is
/// built. Otherwise status, body and headers are carried over and `ETag` is
/// set to `server`, replacing any value the handler set.
pub fn apply(
    decision: Decision,
    response: Response<Bytes>,
    server: &Fingerprint,
    options: &PolicyOptions,
) -> Result<Response<Bytes>, FingerprintError> {
    let etag = server.to_header_value()?;

    match decision {
        Decision::NotModified => {
            let mut not_modified = Response::new(Bytes::new());
            *not_modified.status_mut() = StatusCode::NOT_MODIFIED;
            if options.echo_etag_on_not_modified {
                not_modified.headers_mut().insert(header::ETAG, etag);
            }
            Ok(not_modified)
        }
        Decision::Modified | Decision::Unconditional => {
            let (mut parts, body) = response.into_parts();
            parts.headers.insert(header::ETAG, etag);
            Ok(Response::from_parts(parts, body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn hello() -> Response<Bytes> {
        Response::new(Bytes::from_static(b"<h1>Hello</h1>"))
    }

    #[test]
    fn test_client_fingerprint() {
        let mut headers = HeaderMap::new();
        assert_eq!(client_fingerprint(&headers), None);

        headers.insert(header::IF_NONE_MATCH, HeaderValue::from_static("v1"));
        assert_eq!(client_fingerprint(&headers), Some("v1"));

        // obs-text is a legal header byte but not a usable fingerprint
        headers.insert(header::IF_NONE_MATCH, HeaderValue::from_bytes(b"v\xff1").unwrap());
        assert_eq!(client_fingerprint(&headers), None);
    }

    #[test]
    fn test_decide() {
        let server = Fingerprint::new("v1");
        assert_eq!(decide(Some("v1"), &server), Decision::NotModified);
        assert_eq!(decide(Some("stale"), &server), Decision::Modified);
        assert_eq!(decide(Some("\"v1\""), &server), Decision::Modified);
        assert_eq!(decide(None, &server), Decision::Unconditional);
    }

    #[test]
    fn test_not_modified_is_empty() {
        let server = Fingerprint::new("v1");
        let mut big = Response::new(Bytes::from(vec![b'x'; 64 * 1024]));
        big.headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html"));

        let res = apply(Decision::NotModified, big, &server, &PolicyOptions::default()).unwrap();
        assert_eq!(res.status(), StatusCode::NOT_MODIFIED);
        assert!(res.headers().is_empty());
        assert!(res.body().is_empty());
    }

    #[test]
    fn test_not_modified_echoes_etag() {
        let server = Fingerprint::new("v1");
        let options = PolicyOptions {
            echo_etag_on_not_modified: true,
        };

        let res = apply(Decision::NotModified, hello(), &server, &options).unwrap();
        assert_eq!(res.status(), StatusCode::NOT_MODIFIED);
        assert_eq!(res.headers().len(), 1);
        assert_eq!(res.headers()[header::ETAG], "v1");
        assert!(res.body().is_empty());
    }

    #[test]
    fn test_passthrough_overwrites_etag() {
        let server = Fingerprint::new("v1");
        let mut res = hello();
        *res.status_mut() = StatusCode::CREATED;
        res.headers_mut()
            .insert(header::ETAG, HeaderValue::from_static("old"));
        res.headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html"));

        let res = apply(Decision::Modified, res, &server, &PolicyOptions::default()).unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(res.headers().get_all(header::ETAG).iter().count(), 1);
        assert_eq!(res.headers()[header::ETAG], "v1");
        assert_eq!(res.headers()[header::CONTENT_TYPE], "text/html");
        assert_eq!(res.body().as_ref(), b"<h1>Hello</h1>");
    }

    #[test]
    fn test_invalid_fingerprint_propagates() {
        let server = Fingerprint::new("line\nbreak");
        let err = apply(Decision::Unconditional, hello(), &server, &PolicyOptions::default())
            .unwrap_err();
        assert!(matches!(err, FingerprintError::InvalidHeaderValue(_)));
    }
}
