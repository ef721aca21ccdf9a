//! HTTP API for request dispatch and event streaming
//!
//! Provides:
//! - JSON-RPC request dispatch over POST
//! - Server-Sent Events stream of broadcast events
//! - Health check

pub mod events;
pub mod server;
pub mod stream;

pub use events::{Event, EventHub, EventType, SubscriberGuard};
pub use server::{ApiServer, ApiServerConfig};
