//! Request dispatcher
//!
//! Routes JSON-RPC envelopes to the fixed method set, validates
//! `tools/call` arguments against the registry, and normalizes handler
//! outcomes into response envelopes. Every request produces exactly one
//! response; no failure escapes as a panic or a dropped request.

use super::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION, PROTOCOL_VERSION};
use super::registry::ToolRegistry;
use super::tools::ToolHandler;
use crate::error::EngramError;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

/// MCP request dispatcher
///
/// Owns the immutable tool registry and the tool handler; shared by
/// every inbound request task.
pub struct McpServer {
    registry: ToolRegistry,
    tools: ToolHandler,
}

impl McpServer {
    /// Create a new dispatcher
    pub fn new(tools: ToolHandler) -> Self {
        Self {
            registry: ToolRegistry::new(),
            tools,
        }
    }

    /// The tool registry backing `tools/list` and argument validation
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Dispatch a raw request body
    ///
    /// Malformed JSON yields a parse-error response with a null id, since
    /// no correlation token could be recovered.
    pub async fn dispatch_raw(&self, body: &str) -> JsonRpcResponse {
        let request: JsonRpcRequest = match serde_json::from_str(body) {
            Ok(req) => req,
            Err(e) => {
                return JsonRpcResponse::error(
                    None,
                    JsonRpcError::parse_error(format!("Parse error: {}", e)),
                );
            }
        };

        self.dispatch(request).await
    }

    /// Dispatch a parsed request envelope
    pub async fn dispatch(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        // a request without an id still gets a correlatable response
        let id = request
            .id
            .clone()
            .unwrap_or_else(|| Value::String(Uuid::new_v4().to_string()));

        if request.jsonrpc != JSONRPC_VERSION {
            return JsonRpcResponse::error(
                Some(id),
                JsonRpcError::invalid_request("jsonrpc must be '2.0'"),
            );
        }

        match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, &request.params).await,
            _ => {
                JsonRpcResponse::error(Some(id), JsonRpcError::method_not_found(&request.method))
            }
        }
    }

    /// Handle initialize: static capability and version metadata
    fn handle_initialize(&self, id: Value) -> JsonRpcResponse {
        debug!("Handling initialize");

        JsonRpcResponse::success(
            Some(id),
            serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "serverInfo": {
                    "name": "engram",
                    "version": env!("CARGO_PKG_VERSION")
                },
                "capabilities": {
                    "tools": {}
                }
            }),
        )
    }

    /// Handle tools/list: the static tool catalogue
    fn handle_tools_list(&self, id: Value) -> JsonRpcResponse {
        debug!("Handling tools/list");

        JsonRpcResponse::success(
            Some(id),
            serde_json::json!({
                "tools": self.registry.tools()
            }),
        )
    }

    /// Handle tools/call: validate against the registry, run the handler
    async fn handle_tools_call(&self, id: Value, params: &Value) -> JsonRpcResponse {
        debug!("Handling tools/call");

        let params = match params.as_object() {
            Some(obj) => obj,
            None => {
                return JsonRpcResponse::error(
                    Some(id),
                    JsonRpcError::invalid_params("params must be an object"),
                );
            }
        };

        let tool_name = match params.get("name").and_then(|v| v.as_str()) {
            Some(name) => name,
            None => {
                return JsonRpcResponse::error(
                    Some(id),
                    JsonRpcError::invalid_params("missing 'name' field"),
                );
            }
        };

        let tool = match self.registry.lookup(tool_name) {
            Some(tool) => tool,
            None => {
                warn!("Unknown tool requested: {}", tool_name);
                return JsonRpcResponse::error(Some(id), JsonRpcError::method_not_found(tool_name));
            }
        };

        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or(Value::Object(serde_json::Map::new()));

        if let Err(message) = tool.validate_arguments(&arguments) {
            return JsonRpcResponse::error(Some(id), JsonRpcError::invalid_params(message));
        }

        match self.tools.execute(tool_name, arguments).await {
            Ok(text) => JsonRpcResponse::success(
                Some(id),
                serde_json::json!({
                    "content": [
                        {
                            "type": "text",
                            "text": text
                        }
                    ],
                    "isError": false
                }),
            ),
            Err(EngramError::InvalidParams(message)) => JsonRpcResponse::error(
                Some(id),
                JsonRpcError::invalid_params(format!("Invalid params: {}", message)),
            ),
            Err(e) => {
                warn!("Tool {} failed: {}", tool_name, e);
                JsonRpcResponse::error(
                    Some(id),
                    JsonRpcError::internal_error(format!("Internal error: {}", e)),
                )
            }
        }
    }
}
