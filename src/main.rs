//! UDP health check service.
//!
//! Answers HTTP health checks by probing a UDP service.
//!
//! # Architecture Overview
//!
//! ```text
//!   GET/HEAD /health
//!   ───────────────▶ ┌──────────────┐   ┌─────────────┐   ┌──────────────┐
//!                    │ rate limiter │──▶│   health    │──▶│  UDP probe   │──▶ datagram ──▶ target
//!                    └──────────────┘   │   checker   │   │ (1 socket)   │◀── reply? ◀───
//!   200 UP           ◀──────────────────│ + caller    │◀──│ responded /  │
//!   404 DOWN                            │   timeout   │   │ no response /│
//!   400 (held)                          └─────────────┘   │ unreachable  │
//!                                                         └──────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use udp_health::http::HttpServer;
use udp_health::lifecycle::{self, Overrides, Shutdown};
use udp_health::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "udp-health")]
#[command(about = "HTTP health endpoint backed by a UDP probe", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// UDP host to probe (overrides probe.host).
    #[arg(long)]
    host: Option<String>,

    /// UDP port to probe (overrides probe.port).
    #[arg(short, long)]
    port: Option<u16>,

    /// Probe payload, text with \xHH escapes (overrides probe.payload).
    #[arg(long)]
    payload: Option<String>,

    /// HTTP bind address (overrides listener.bind_address).
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let overrides = Overrides {
        host: cli.host,
        port: cli.port,
        payload: cli.payload,
        bind_address: cli.bind,
    };

    let config = lifecycle::prepare(cli.config.as_deref(), &overrides)?;

    logging::init_logging(&config.observability);
    tracing::info!("udp-health v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        udp_host = %config.probe.host,
        udp_port = config.probe.port,
        udp_timeout_ms = config.probe.timeout_ms,
        caller_timeout_secs = config.probe.caller_timeout_secs,
        rate_limit = config.rate_limit.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Validated at startup.
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
