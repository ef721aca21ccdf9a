//! Model Context Protocol (MCP) dispatch layer
//!
//! JSON-RPC 2.0 method dispatch over the HTTP transport: a fixed method
//! set (`initialize`, `tools/list`, `tools/call`) with three memory
//! tools backed by the remote recall service.

pub mod protocol;
pub mod registry;
pub mod server;
pub mod tools;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use registry::{Tool, ToolRegistry};
pub use server::McpServer;
pub use tools::ToolHandler;
