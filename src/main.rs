//! Trace gateway.
//!
//! ```text
//!  browser ── GET /api/v1/trace/ethereum/{tx} ──▶ gateway ── debug_traceTransaction ──▶ node
//!  browser ◀── {"ok":true,"result":{...}} ─────── gateway ◀── {"result":{...}} ──────── node
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use trace_gateway::config::{load_config, ConfigOverrides};
use trace_gateway::observability::init_logging;
use trace_gateway::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "trace-gateway")]
#[command(about = "Serves debug_traceTransaction results as browser-friendly JSON", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long, env = "TRACE_GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Listener bind address, e.g. 0.0.0.0:2000.
    #[arg(long, env = "TRACE_GATEWAY_BIND")]
    bind: Option<String>,

    /// Upstream JSON-RPC URL.
    #[arg(long, env = "TRACE_GATEWAY_UPSTREAM_URL")]
    upstream_url: Option<String>,

    /// Deadline for each upstream call, in seconds.
    #[arg(long, env = "TRACE_GATEWAY_UPSTREAM_TIMEOUT_SECS")]
    upstream_timeout_secs: Option<u64>,

    /// Log level used when RUST_LOG is unset.
    #[arg(long, env = "TRACE_GATEWAY_LOG_LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        bind_address: cli.bind,
        upstream_url: cli.upstream_url,
        upstream_timeout_secs: cli.upstream_timeout_secs,
        log_level: cli.log_level,
    };
    let config = load_config(cli.config.as_deref(), overrides)?;

    init_logging(&config.observability.log_level);
    tracing::info!("trace-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.rpc_url,
        upstream_timeout_secs = config.upstream.timeout_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
