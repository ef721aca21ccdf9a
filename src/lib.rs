//! Engram - Streaming Memory Bridge
//!
//! A JSON-RPC 2.0 tool server paired with a multi-subscriber event
//! broadcast, fronting a remote recall service:
//! - Fixed method set (`initialize`, `tools/list`, `tools/call`) with
//!   three memory tools (store, search, recent)
//! - In-process fan-out hub delivering every published event to all live
//!   streaming sessions, in publish order, without letting a slow
//!   consumer stall anyone else
//! - Long-lived SSE sessions with connection and heartbeat framing
//!
//! # Architecture
//!
//! The system is organized into several layers:
//! - **Types**: record and metadata shapes owned by the remote store
//! - **Store**: the narrow client capability over the recall service
//! - **MCP**: protocol envelopes, tool registry, request dispatcher
//! - **API**: axum transport, broadcast hub, streaming sessions
//!
//! # Example
//!
//! ```ignore
//! use engram::{ApiServer, ApiServerConfig, EventHub, McpServer, RecallClient, Settings, ToolHandler};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::from_env()?;
//!     let config = ApiServerConfig::default();
//!
//!     let hub = EventHub::new(config.event_capacity);
//!     let store = Arc::new(RecallClient::new(&settings)?);
//!     let tools = ToolHandler::new(store, hub.clone(), settings);
//!
//!     ApiServer::new(config, McpServer::new(tools), hub).serve().await
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod mcp;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use api::{ApiServer, ApiServerConfig, Event, EventHub, EventType};
pub use config::Settings;
pub use error::{EngramError, Result};
pub use mcp::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpServer, ToolHandler, ToolRegistry};
pub use store::{RecallClient, StoreClient};
pub use types::{MemoryCategory, MemoryRecord, RecordMetadata};
