//! Runtime configuration for the Engram bridge
//!
//! Settings are sourced from the environment (prefix `ENGRAM_`) with
//! defaults for everything except the recall service API key, which the
//! store client refuses to run without.

use crate::error::Result;
use serde::Deserialize;

/// Bridge settings: recall service credentials plus the provenance tags
/// stamped into every stored record's metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// API key for the remote recall service
    pub api_key: String,

    /// Base URL of the remote recall service
    pub base_url: String,

    /// Subject (owning user/context) for all store operations
    pub subject: String,

    /// Client tag recorded in metadata
    pub client: String,

    /// Project tag recorded in metadata
    pub project_type: String,

    /// Device tag recorded in metadata
    pub device: String,
}

impl Settings {
    /// Load settings from the environment
    ///
    /// Recognized variables: `ENGRAM_API_KEY`, `ENGRAM_BASE_URL`,
    /// `ENGRAM_SUBJECT`, `ENGRAM_CLIENT`, `ENGRAM_PROJECT_TYPE`,
    /// `ENGRAM_DEVICE`.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .set_default("api_key", "")?
            .set_default("base_url", "https://api.recall.ai")?
            .set_default("subject", "default_user")?
            .set_default("client", "Engram")?
            .set_default("project_type", "memory_bridge")?
            .set_default("device", "mcp_server")?
            .add_source(config::Environment::with_prefix("ENGRAM"))
            .build()?;

        Ok(cfg.try_deserialize()?)
    }
}
