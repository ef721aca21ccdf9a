//! Common test utilities and helpers

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use engram::{
    EventHub, McpServer, MemoryRecord, RecordMetadata, Result, Settings, StoreClient, ToolHandler,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-memory store double backing dispatcher integration tests
///
/// Mirrors the recall service contract: ids assigned on add, search by
/// naive substring relevance, list in insertion order.
pub struct InMemoryStore {
    records: Mutex<Vec<MemoryRecord>>,
    next_id: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
        }
    }

    /// Seed the store with pre-built records
    pub fn with_records(records: Vec<MemoryRecord>) -> Self {
        let next_id = records.len() + 1;
        Self {
            records: Mutex::new(records),
            next_id: AtomicUsize::new(next_id),
        }
    }

    pub async fn record_count(&self) -> usize {
        self.records.lock().await.len()
    }
}

#[async_trait]
impl StoreClient for InMemoryStore {
    async fn add(
        &self,
        content: &str,
        subject: &str,
        metadata: &RecordMetadata,
    ) -> Result<MemoryRecord> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let metadata_map = match serde_json::to_value(metadata)? {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };

        let record = MemoryRecord {
            id: format!("rec-{}", id),
            content: content.to_string(),
            subject: subject.to_string(),
            metadata: metadata_map,
            created_at: Utc::now(),
        };

        self.records.lock().await.push(record.clone());
        Ok(record)
    }

    async fn search(&self, query: &str, subject: &str, limit: usize) -> Result<Vec<MemoryRecord>> {
        let needle = query.to_lowercase();
        let mut matches: Vec<MemoryRecord> = self
            .records
            .lock()
            .await
            .iter()
            .filter(|r| r.subject == subject && r.content.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        matches.truncate(limit);
        Ok(matches)
    }

    async fn list(&self, subject: &str) -> Result<Vec<MemoryRecord>> {
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .filter(|r| r.subject == subject)
            .cloned()
            .collect())
    }
}

/// Settings fixture pointing at nothing real
pub fn test_settings() -> Settings {
    Settings {
        api_key: "test-key".to_string(),
        base_url: "https://recall.test".to_string(),
        subject: "tester".to_string(),
        client: "Engram".to_string(),
        project_type: "memory_bridge".to_string(),
        device: "mcp_server".to_string(),
    }
}

/// Build a record with an explicit creation time, for ordering tests
pub fn record_at(id: &str, content: &str, created_at: DateTime<Utc>) -> MemoryRecord {
    MemoryRecord {
        id: id.to_string(),
        content: content.to_string(),
        subject: "tester".to_string(),
        metadata: serde_json::Map::new(),
        created_at,
    }
}

/// Wire a dispatcher around the given store, sharing the returned hub
pub fn build_server(store: Arc<dyn StoreClient>) -> (McpServer, EventHub) {
    let hub = EventHub::new(16);
    let tools = ToolHandler::new(store, hub.clone(), test_settings());
    (McpServer::new(tools), hub)
}

/// Shorthand for a tools/call request body
pub fn tool_call(id: Value, name: &str, arguments: Value) -> engram::JsonRpcRequest {
    engram::JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: "tools/call".to_string(),
        params: json!({"name": name, "arguments": arguments}),
        id: Some(id),
    }
}

/// Shorthand for a bare request body
pub fn request(id: Value, method: &str) -> engram::JsonRpcRequest {
    engram::JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params: Value::Null,
        id: Some(id),
    }
}

/// Pull the text content out of a tools/call success result
pub fn result_text(response: &engram::JsonRpcResponse) -> String {
    response
        .result
        .as_ref()
        .expect("expected success response")["content"][0]["text"]
        .as_str()
        .expect("expected text content")
        .to_string()
}
