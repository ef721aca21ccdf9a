//! Static tool registry
//!
//! The tool catalogue is defined once at startup and never mutated.
//! `tools/list` serves the descriptors verbatim; the dispatcher uses the
//! same descriptors to validate `tools/call` arguments before a handler
//! ever runs, so unrecognized tools and missing required fields are
//! rejected at the boundary.

use serde::Serialize;
use serde_json::{json, Value};

/// Tool descriptor served by `tools/list`
#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    /// Tool name (e.g., "store_memory")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,

    /// Required argument names, mirrored from the schema for dispatch
    /// validation
    #[serde(skip)]
    pub required: Vec<&'static str>,
}

impl Tool {
    /// Validate that every required argument is present and, for
    /// strings, non-empty. Null counts as absent.
    pub fn validate_arguments(&self, arguments: &Value) -> Result<(), String> {
        for name in &self.required {
            let missing = match arguments.get(name) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.is_empty(),
                Some(_) => false,
            };

            if missing {
                return Err(format!("Invalid params: {} is required", name));
            }
        }

        Ok(())
    }
}

/// Immutable catalogue of the tools this bridge exposes
pub struct ToolRegistry {
    tools: Vec<Tool>,
}

impl ToolRegistry {
    /// Build the registry; called once at process start
    pub fn new() -> Self {
        let tools = vec![
            Tool {
                name: "store_memory".to_string(),
                description:
                    "Store important information from conversations in long-term memory"
                        .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "message": {
                            "type": "string",
                            "description": "The information to remember"
                        },
                        "category": {
                            "type": "string",
                            "description": "Category of memory (optional)",
                            "enum": ["personal", "work", "preference", "context", "general"]
                        }
                    },
                    "required": ["message"]
                }),
                required: vec!["message"],
            },
            Tool {
                name: "search_memory".to_string(),
                description: "Search for previously stored memories".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Search query"
                        },
                        "limit": {
                            "type": "integer",
                            "description": "Number of results (default 5)",
                            "default": 5
                        }
                    },
                    "required": ["query"]
                }),
                required: vec!["query"],
            },
            Tool {
                name: "get_recent_memories".to_string(),
                description: "Get the most recent memories".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "limit": {
                            "type": "integer",
                            "description": "Number of memories to retrieve",
                            "default": 10
                        }
                    }
                }),
                required: vec![],
            },
        ];

        Self { tools }
    }

    /// Look up a tool descriptor by name
    pub fn lookup(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// All registered tools, in catalogue order
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
