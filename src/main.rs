//! Engram - Streaming Memory Bridge
//!
//! Entry point for the bridge server: JSON-RPC tool dispatch plus the
//! SSE event stream, both served from one axum listener.

use clap::Parser;
use engram::{ApiServer, ApiServerConfig, EventHub, McpServer, RecallClient, Settings, ToolHandler};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "engram", version, about = "Streaming memory bridge server")]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "ENGRAM_ADDR", default_value = "127.0.0.1:8080")]
    addr: String,

    /// Per-subscriber event queue capacity
    #[arg(long, env = "ENGRAM_EVENT_CAPACITY", default_value_t = 256)]
    event_capacity: usize,

    /// Idle seconds before a streaming session emits a heartbeat
    #[arg(long, env = "ENGRAM_HEARTBEAT_SECS", default_value_t = 30)]
    heartbeat_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout stays clean for tooling
    let filter = EnvFilter::new(format!("engram={}", cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("Engram v{} starting...", env!("CARGO_PKG_VERSION"));

    let settings = Settings::from_env()?;
    let addr: SocketAddr = cli
        .addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address '{}': {}", cli.addr, e))?;

    let config = ApiServerConfig {
        addr,
        event_capacity: cli.event_capacity,
        heartbeat_interval: Duration::from_secs(cli.heartbeat_secs),
    };

    let hub = EventHub::new(config.event_capacity);
    let store = Arc::new(RecallClient::new(&settings)?);
    let tools = ToolHandler::new(store, hub.clone(), settings);
    let server = ApiServer::new(config, McpServer::new(tools), hub);

    server.serve().await
}
