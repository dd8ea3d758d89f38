//! call-logger service binary.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ request id ─▶ trace ─▶ timeout ─▶ body limit ─▶ handler
//!                                                                      │
//!                          ┌───────────────────────────────────────────┤
//!                          ▼                                           ▼
//!                 ┌──────────────────┐                       ┌──────────────────┐
//!                 │ ControllerLogger │  headers, URL, args   │  MethodLogger    │
//!                 │  (per handler)   │  response / failure   │ (Loggable fns)   │
//!                 └────────┬─────────┘                       └────────┬─────────┘
//!                          └──────────────┬───────────────────────────┘
//!                                         ▼
//!                              tracing → non-blocking sink
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use call_logger::config::{load, CliOverrides};
use call_logger::lifecycle::signals;
use call_logger::observability::init_logging;
use call_logger::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "call-logger")]
#[command(about = "HTTP service with request, controller and method call logging", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `server.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        bind_address: cli.bind,
    };
    let config = load(cli.config.as_deref(), &overrides)?;

    let _log_guard = init_logging(&config.observability);

    tracing::info!("call-logger v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.server.bind_address,
        controller_logging = config.logging.controller_logging_enabled,
        method_logging = config.logging.method_logging_enabled,
        request_timeout_secs = config.server.request_timeout_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config);
    server.run_until(listener, shutdown.wait()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
