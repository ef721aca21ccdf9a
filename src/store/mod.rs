//! Store client layer for the remote recall service
//!
//! The bridge never owns memory durability; it talks to an external
//! recall service through the narrow [`StoreClient`] capability. The
//! service assigns record ids and creation timestamps; the bridge only
//! creates and reads records.

pub mod http;

use crate::error::Result;
use crate::types::{MemoryRecord, RecordMetadata};
use async_trait::async_trait;

pub use http::RecallClient;

/// Abstract capability over the durable memory store
///
/// Calls are potentially blocking network operations; implementations
/// must be safe to invoke from many concurrent tasks at once.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Create a new record; each call creates a new record even when the
    /// content duplicates a prior call.
    async fn add(
        &self,
        content: &str,
        subject: &str,
        metadata: &RecordMetadata,
    ) -> Result<MemoryRecord>;

    /// Relevance-ordered search over the subject's records
    async fn search(&self, query: &str, subject: &str, limit: usize) -> Result<Vec<MemoryRecord>>;

    /// All records for a subject, in store order
    async fn list(&self, subject: &str) -> Result<Vec<MemoryRecord>>;
}
