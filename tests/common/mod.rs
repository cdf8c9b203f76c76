//! Shared utilities for integration tests.

use axum::body::{Body, Bytes};
use axum::http::{header, Request, Response};
use etag_interceptor::{HttpServer, ServerConfig, Shutdown};
use std::net::SocketAddr;
use std::time::Duration;

/// Start the demo server on `addr` and return the handle that stops it.
#[allow(dead_code)]
pub async fn start_server(addr: SocketAddr, mut config: ServerConfig) -> Shutdown {
    config.listener.bind_address = addr.to_string();
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown
}

/// GET `uri`, optionally presenting a fingerprint.
#[allow(dead_code)]
pub fn get(uri: &str, if_none_match: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = if_none_match {
        builder = builder.header(header::IF_NONE_MATCH, value);
    }
    builder.body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub async fn body_bytes(response: Response<Body>) -> Bytes {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
}
