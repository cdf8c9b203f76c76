//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the content handler
//! - Wire up middleware (tracing, error mapping, conditional caching)
//! - Bind server to listener and shut down gracefully

use axum::{
    error_handling::HandleErrorLayer,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::{ContentConfig, ServerConfig};
use crate::interceptor::{EtagLayer, InterceptError};
use crate::lifecycle::shutdown;

/// HTTP server serving configured content behind the ETag interceptor.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    pub fn new(config: ServerConfig) -> Self {
        let router = Self::build_router(&config);
        Self { router, config }
    }

    fn build_router(config: &ServerConfig) -> Router {
        let etag = EtagLayer::with_options(
            config.cache.strategy.clone(),
            config.cache.interceptor_options(),
        );

        Router::new()
            .route("/", get(content_handler))
            .route("/{*path}", get(content_handler))
            .with_state(Arc::new(config.content.clone()))
            .layer(
                ServiceBuilder::new()
                    .layer(HandleErrorLayer::new(handle_intercept_error))
                    .layer(etag),
            )
            .layer(TraceLayer::new_for_http())
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            strategy = ?self.config.cache.strategy,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

async fn content_handler(State(content): State<Arc<ContentConfig>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, content.content_type.clone())],
        content.body.clone(),
    )
}

async fn handle_intercept_error(err: InterceptError<Infallible>) -> StatusCode {
    tracing::error!(error = %err, "Conditional caching failed");
    StatusCode::INTERNAL_SERVER_ERROR
}
