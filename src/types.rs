//! Core data types for the Engram memory bridge
//!
//! Defines the record shape owned by the remote recall service and the
//! metadata envelope attached to every stored record. The bridge never
//! mutates a record after creation; it only creates and reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored unit of recalled information, owned by the remote store
///
/// The `id` is assigned by the store on creation and treated as opaque
/// here. Records arriving from the wire may omit `subject` or `metadata`
/// depending on which endpoint produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Opaque identifier assigned by the store
    pub id: String,

    /// Memory content
    pub content: String,

    /// Owning user/context
    #[serde(default)]
    pub subject: String,

    /// Scalar metadata attached at creation time
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,

    /// Creation timestamp assigned by the store
    pub created_at: DateTime<Utc>,
}

/// Category tag recorded with every stored memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MemoryCategory {
    Personal,
    Work,
    Preference,
    Context,
    #[default]
    General,
}

impl MemoryCategory {
    /// Parse a category tag, falling back to `General` for unknown input
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "personal" => MemoryCategory::Personal,
            "work" => MemoryCategory::Work,
            "preference" => MemoryCategory::Preference,
            "context" => MemoryCategory::Context,
            _ => MemoryCategory::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryCategory::Personal => "personal",
            MemoryCategory::Work => "work",
            MemoryCategory::Preference => "preference",
            MemoryCategory::Context => "context",
            MemoryCategory::General => "general",
        }
    }
}

impl std::fmt::Display for MemoryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Metadata envelope attached to every record at creation time
///
/// Mirrors what the recall service indexes on: a category tag, calendar
/// buckets for time-scoped queries, and client/device/project provenance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordMetadata {
    pub category: MemoryCategory,
    pub day: String,
    pub month: String,
    pub year: String,
    pub client: String,
    pub project_type: String,
    pub device: String,
    pub timestamp: DateTime<Utc>,
    pub source: String,
}

impl RecordMetadata {
    /// Capture metadata for a record created now
    pub fn capture(
        category: MemoryCategory,
        client: &str,
        project_type: &str,
        device: &str,
    ) -> Self {
        let now = Utc::now();
        Self {
            category,
            day: now.format("%Y-%m-%d").to_string(),
            month: now.format("%Y-%m").to_string(),
            year: now.format("%Y").to_string(),
            client: client.to_string(),
            project_type: project_type.to_string(),
            device: device.to_string(),
            timestamp: now,
            source: "engram".to_string(),
        }
    }
}
