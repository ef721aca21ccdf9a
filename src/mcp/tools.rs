//! Memory tool implementations
//!
//! Three tools over the remote recall service:
//! - store_memory: create a record, announce it on the hub
//! - search_memory: relevance search, announce the query on the hub
//! - get_recent_memories: newest records first
//!
//! The dispatcher has already validated required arguments by the time a
//! handler runs; handlers only decode optional fields and defaults.

use crate::api::events::{Event, EventHub};
use crate::config::Settings;
use crate::error::{EngramError, Result};
use crate::store::StoreClient;
use crate::types::{MemoryCategory, MemoryRecord, RecordMetadata};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Default result count for search_memory
const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Default result count for get_recent_memories
const DEFAULT_RECENT_LIMIT: usize = 10;

/// Tool handler that dispatches to the appropriate implementation
pub struct ToolHandler {
    store: Arc<dyn StoreClient>,
    hub: EventHub,
    settings: Settings,
}

impl ToolHandler {
    /// Create a new tool handler
    pub fn new(store: Arc<dyn StoreClient>, hub: EventHub, settings: Settings) -> Self {
        Self {
            store,
            hub,
            settings,
        }
    }

    /// Execute a tool call, returning the human-readable result text
    pub async fn execute(&self, tool_name: &str, arguments: Value) -> Result<String> {
        debug!("Executing tool: {}", tool_name);

        match tool_name {
            "store_memory" => self.store_memory(arguments).await,
            "search_memory" => self.search_memory(arguments).await,
            "get_recent_memories" => self.get_recent_memories(arguments).await,
            _ => Err(EngramError::InvalidParams(format!(
                "Unknown tool: {}",
                tool_name
            ))),
        }
    }

    async fn store_memory(&self, arguments: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct StoreMemoryParams {
            message: String,
            #[serde(default)]
            category: Option<String>,
        }

        let params: StoreMemoryParams = decode_arguments(arguments)?;
        let category = params
            .category
            .as_deref()
            .map(MemoryCategory::from_str_lossy)
            .unwrap_or_default();

        let metadata = RecordMetadata::capture(
            category,
            &self.settings.client,
            &self.settings.project_type,
            &self.settings.device,
        );

        let record = self
            .store
            .add(&params.message, &self.settings.subject, &metadata)
            .await?;

        self.hub
            .publish(Event::memory_added(record.id.clone(), category));

        Ok(format!(
            "Memory stored successfully with ID: {}",
            record.id
        ))
    }

    async fn search_memory(&self, arguments: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct SearchMemoryParams {
            query: String,
            #[serde(default)]
            limit: Option<usize>,
        }

        let params: SearchMemoryParams = decode_arguments(arguments)?;
        let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);

        let results = self
            .store
            .search(&params.query, &self.settings.subject, limit)
            .await?;

        self.hub
            .publish(Event::memory_search(params.query, results.len()));

        if results.is_empty() {
            return Ok("No memories found".to_string());
        }

        Ok(format!(
            "Found {} memories:\n{}",
            results.len(),
            bulleted(&results)
        ))
    }

    async fn get_recent_memories(&self, arguments: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct RecentMemoriesParams {
            #[serde(default)]
            limit: Option<usize>,
        }

        let params: RecentMemoriesParams = decode_arguments(arguments)?;
        let limit = params.limit.unwrap_or(DEFAULT_RECENT_LIMIT);

        let mut records = self.store.list(&self.settings.subject).await?;

        // newest first; the stable sort keeps store order for equal
        // timestamps
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit);

        if records.is_empty() {
            return Ok("No memories stored yet".to_string());
        }

        Ok(format!("Recent memories:\n{}", bulleted(&records)))
    }
}

/// Decode tool arguments, mapping malformed input to an invalid-params
/// failure instead of an internal error
fn decode_arguments<T: serde::de::DeserializeOwned>(arguments: Value) -> Result<T> {
    serde_json::from_value(arguments).map_err(|e| EngramError::InvalidParams(e.to_string()))
}

/// Render records as a bulleted text summary
fn bulleted(records: &[MemoryRecord]) -> String {
    records
        .iter()
        .map(|r| format!("• {}", r.content))
        .collect::<Vec<_>>()
        .join("\n")
}
