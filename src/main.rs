//! ETag interceptor demo server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request          ┌──────────────────────────────────────────────┐
//!     ────────────────────────┼─▶ TraceLayer ─▶ EtagLayer ─▶ content handler  │
//!                             │                    │                          │
//!                             │     If-None-Match == fingerprint(response)?   │
//!                             │          yes: 304, empty body                 │
//!     Client Response         │          no:  200 + ETag: fingerprint         │
//!     ◀───────────────────────┼──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use etag_interceptor::config::resolve_config;
use etag_interceptor::lifecycle::{signals, Shutdown};
use etag_interceptor::observability::{logging, metrics};
use etag_interceptor::HttpServer;

#[derive(Parser)]
#[command(name = "etag-interceptor")]
#[command(about = "Serve content behind an ETag conditional-caching interceptor", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = resolve_config(cli.config.as_deref(), cli.bind)?;

    logging::init_logging(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        strategy = ?config.cache.strategy,
        echo_etag_on_not_modified = config.cache.echo_etag_on_not_modified,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    signals::spawn_ctrl_c(shutdown.clone());

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
