//! HTTP server: request dispatch, event streaming, health
//!
//! One router, three surfaces:
//! - `POST /mcp`: JSON-RPC request dispatch
//! - `GET /mcp`: long-lived SSE stream of broadcast events
//! - `GET /health`: liveness probe
//!
//! The server context (dispatcher + hub) is constructed at process start
//! and handed to every handler through axum state; there are no hidden
//! statics.

use super::events::EventHub;
use super::stream::session_stream;
use crate::mcp::{JsonRpcResponse, McpServer};
use axum::{
    extract::State,
    response::sse::{Event as SseEvent, Sse},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::StreamExt as _;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Server address
    pub addr: SocketAddr,
    /// Per-subscriber event queue capacity
    pub event_capacity: usize,
    /// Idle interval after which streaming sessions emit a heartbeat
    pub heartbeat_interval: Duration,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            addr: ([127, 0, 0, 1], 8080).into(),
            event_capacity: 256,
            heartbeat_interval: Duration::from_secs(30),
        }
    }
}

/// Shared handler state
#[derive(Clone)]
struct AppState {
    /// Request dispatcher
    mcp: Arc<McpServer>,
    /// Broadcast hub
    hub: EventHub,
    /// Streaming keep-alive interval
    heartbeat_interval: Duration,
}

/// API server
pub struct ApiServer {
    config: ApiServerConfig,
    state: AppState,
}

impl ApiServer {
    /// Create a new API server around an existing dispatcher and hub
    pub fn new(config: ApiServerConfig, mcp: McpServer, hub: EventHub) -> Self {
        let state = AppState {
            mcp: Arc::new(mcp),
            hub,
            heartbeat_interval: config.heartbeat_interval,
        };

        Self { config, state }
    }

    /// The broadcast hub shared with the dispatcher
    pub fn hub(&self) -> &EventHub {
        &self.state.hub
    }

    /// Build the router
    pub fn router(&self) -> Router {
        Router::new()
            .route("/mcp", post(mcp_handler).get(events_handler))
            .route("/health", get(health_handler))
            .with_state(self.state.clone())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Bind and serve until the process stops
    pub async fn serve(self) -> anyhow::Result<()> {
        let router = self.router();
        let listener = tokio::net::TcpListener::bind(self.config.addr).await?;

        info!("Engram bridge listening on http://{}", self.config.addr);
        axum::serve(listener, router).await?;
        Ok(())
    }
}

/// JSON-RPC dispatch handler
///
/// Takes the raw body so malformed JSON becomes a -32700 response
/// instead of a transport-level rejection.
async fn mcp_handler(State(state): State<AppState>, body: String) -> Json<JsonRpcResponse> {
    Json(state.mcp.dispatch_raw(&body).await)
}

/// SSE streaming handler
async fn events_handler(
    State(state): State<AppState>,
) -> Sse<impl tokio_stream::Stream<Item = Result<SseEvent, Infallible>>> {
    debug!("New streaming session connected");

    let stream = session_stream(&state.hub, state.heartbeat_interval).map(|event| {
        let data = serde_json::to_string(&event).unwrap_or_else(|_| "{}".to_string());
        Ok(SseEvent::default().id(event.id).data(data))
    });

    Sse::new(stream)
}

/// Health check handler
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
    subscribers: usize,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "engram".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        subscribers: state.hub.subscriber_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::error::{EngramError, Result};
    use crate::mcp::ToolHandler;
    use crate::store::StoreClient;
    use crate::types::{MemoryRecord, RecordMetadata};
    use async_trait::async_trait;

    /// Store double that refuses every call
    struct UnconfiguredStore;

    #[async_trait]
    impl StoreClient for UnconfiguredStore {
        async fn add(
            &self,
            _content: &str,
            _subject: &str,
            _metadata: &RecordMetadata,
        ) -> Result<MemoryRecord> {
            Err(EngramError::Store("store not configured".to_string()))
        }

        async fn search(
            &self,
            _query: &str,
            _subject: &str,
            _limit: usize,
        ) -> Result<Vec<MemoryRecord>> {
            Err(EngramError::Store("store not configured".to_string()))
        }

        async fn list(&self, _subject: &str) -> Result<Vec<MemoryRecord>> {
            Err(EngramError::Store("store not configured".to_string()))
        }
    }

    fn test_state() -> AppState {
        let hub = EventHub::new(8);
        let settings = Settings {
            api_key: "test-key".to_string(),
            base_url: "https://recall.test".to_string(),
            subject: "tester".to_string(),
            client: "Engram".to_string(),
            project_type: "memory_bridge".to_string(),
            device: "mcp_server".to_string(),
        };
        let tools = ToolHandler::new(Arc::new(UnconfiguredStore), hub.clone(), settings);

        AppState {
            mcp: Arc::new(McpServer::new(tools)),
            hub,
            heartbeat_interval: Duration::from_secs(30),
        }
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = health_handler(State(test_state())).await;

        assert_eq!(response.0.status, "ok");
        assert_eq!(response.0.service, "engram");
        assert_eq!(response.0.subscribers, 0);
    }

    #[tokio::test]
    async fn test_mcp_handler_surfaces_parse_error() {
        let response = mcp_handler(State(test_state()), "{broken".to_string()).await;

        let error = response.0.error.expect("parse failure expected");
        assert_eq!(error.code, -32700);
    }
}
