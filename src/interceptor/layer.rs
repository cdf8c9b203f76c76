//! Tower layer and service wiring the ETag policy around an inner service.

use axum::body::{Body, Bytes, HttpBody};
use axum::http::{Request, Response};
use axum::BoxError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

use super::error::InterceptError;
use super::fingerprint::Fingerprinter;
use super::policy::{self, PolicyOptions};
use crate::observability::metrics;

/// Options shared by every service produced from one [`EtagLayer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterceptorOptions {
    pub policy: PolicyOptions,
    /// Optional cap on buffered bodies; larger responses fail with
    /// [`InterceptError::BodyTooLarge`]. Unbounded when `None`.
    pub max_body_bytes: Option<usize>,
}

/// Layer applying conditional caching with the given fingerprint strategy.
///
/// ```ignore
/// let app = Router::new()
///     .route("/", get(index))
///     .layer(
///         ServiceBuilder::new()
///             .layer(HandleErrorLayer::new(on_error))
///             .layer(EtagLayer::new(ContentDigest::new())),
///     );
/// ```
pub struct EtagLayer<F> {
    fingerprinter: Arc<F>,
    options: InterceptorOptions,
}

impl<F> EtagLayer<F> {
    pub fn new(fingerprinter: F) -> Self {
        Self::with_options(fingerprinter, InterceptorOptions::default())
    }

    pub fn with_options(fingerprinter: F, options: InterceptorOptions) -> Self {
        Self {
            fingerprinter: Arc::new(fingerprinter),
            options,
        }
    }
}

impl<F> Clone for EtagLayer<F> {
    fn clone(&self) -> Self {
        Self {
            fingerprinter: self.fingerprinter.clone(),
            options: self.options,
        }
    }
}

impl<S, F> Layer<S> for EtagLayer<F> {
    type Service = EtagService<S, F>;

    fn layer(&self, inner: S) -> Self::Service {
        EtagService {
            inner,
            fingerprinter: self.fingerprinter.clone(),
            options: self.options,
        }
    }
}

/// Service produced by [`EtagLayer`].
pub struct EtagService<S, F> {
    inner: S,
    fingerprinter: Arc<F>,
    options: InterceptorOptions,
}

impl<S: Clone, F> Clone for EtagService<S, F> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            fingerprinter: self.fingerprinter.clone(),
            options: self.options,
        }
    }
}

impl<S, F, ReqBody, ResBody> Service<Request<ReqBody>> for EtagService<S, F>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
    F: Fingerprinter + 'static,
    ReqBody: Send + 'static,
    ResBody: HttpBody<Data = Bytes> + Send + 'static,
    ResBody::Error: Into<BoxError>,
{
    type Response = Response<Body>;
    type Error = InterceptError<S::Error>;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(InterceptError::Handler)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        // The clone may not be ready; keep the one poll_ready was called on.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let fingerprinter = self.fingerprinter.clone();
        let options = self.options;

        let client = policy::client_fingerprint(request.headers()).map(str::to_owned);
        let method = request.method().clone();
        let path = request.uri().path().to_owned();

        Box::pin(async move {
            let response = inner.call(request).await.map_err(InterceptError::Handler)?;

            let (parts, body) = response.into_parts();
            let bytes = buffer_body(body, options.max_body_bytes).await?;
            metrics::record_buffered_body(bytes.len());
            let materialized = Response::from_parts(parts, bytes);

            let server = fingerprinter.fingerprint(&materialized).map_err(|e| {
                tracing::warn!(method = %method, path = %path, error = %e, "Fingerprint strategy failed");
                e
            })?;

            let decision = policy::decide(client.as_deref(), &server);
            tracing::debug!(
                method = %method,
                path = %path,
                decision = decision.as_str(),
                fingerprint = %server,
                "Conditional request evaluated"
            );
            metrics::record_decision(decision);

            let response = policy::apply(decision, materialized, &server, &options.policy)?;
            Ok(response.map(Body::from))
        })
    }
}

/// Collect the inner body, enforcing `limit` when one is configured.
async fn buffer_body<B, E>(body: B, limit: Option<usize>) -> Result<Bytes, InterceptError<E>>
where
    B: HttpBody<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    if let Some(limit) = limit {
        let declared = body.size_hint().lower();
        if declared > limit as u64 {
            return Err(InterceptError::BodyTooLarge { limit });
        }
    }

    let bytes = axum::body::to_bytes(Body::new(body), usize::MAX)
        .await
        .map_err(|e| InterceptError::HandlerBody(e.into_inner()))?;

    match limit {
        Some(limit) if bytes.len() > limit => Err(InterceptError::BodyTooLarge { limit }),
        _ => Ok(bytes),
    }
}
