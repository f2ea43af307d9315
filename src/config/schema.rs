//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section has defaults so a partial file loads cleanly; validation
//! decides what is actually required to run.

use serde::{Deserialize, Serialize};

/// Environment variable holding the buyer's hex-encoded signing key.
pub const BUYER_KEY_ENV_VAR: &str = "ESTATE_BUYER_SK";
/// Environment variable holding the seller's hex-encoded signing key.
pub const SELLER_KEY_ENV_VAR: &str = "ESTATE_SELLER_SK";
/// Environment variable holding the deployer's hex-encoded signing key.
pub const DEPLOYER_KEY_ENV_VAR: &str = "ESTATE_DEPLOYER_SK";

/// Root configuration for the orchestrator.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Transacting parties and the land token.
    pub parties: PartiesConfig,

    /// External document API endpoints.
    pub document_api: DocumentApiConfig,

    /// Ledger node endpoint and credentials.
    pub ledger: LedgerConfig,

    /// Confirmation polling budget.
    pub poller: PollerConfig,

    /// Land-verification application settings (contract workflow).
    pub contract: ContractConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Buyer, seller and the token being transferred.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PartiesConfig {
    /// Buyer account address.
    pub buyer_address: String,

    /// Seller account address.
    pub seller_address: String,

    /// Asset id of the land-ownership token.
    pub land_token_id: u64,
}

/// Document API endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DocumentApiConfig {
    /// Client-credentials token endpoint.
    pub token_url: String,

    /// Documents listing endpoint.
    pub api_url: String,

    /// Base URL under which verified documents are addressable; the
    /// verification asset's URL is `<base>/<document hash>`.
    pub storage_base_url: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for DocumentApiConfig {
    fn default() -> Self {
        Self {
            token_url: String::new(),
            api_url: String::new(),
            storage_base_url: "https://your.document.storage".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Ledger node endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Node REST endpoint URL.
    pub base_url: String,

    /// Node API token.
    pub api_token: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4001".to_string(),
            api_token: String::new(),
            request_timeout_secs: 10,
        }
    }
}

/// Confirmation polling budget.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Maximum status queries per handle.
    pub max_attempts: u32,

    /// Wait between queries in milliseconds.
    pub interval_ms: u64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            interval_ms: 2_000,
        }
    }
}

/// Land-verification application settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Application name used on deploy.
    pub app_name: String,

    /// Deployer account address.
    pub deployer_address: String,

    /// Amount sent to the freshly deployed app, in the ledger's smallest
    /// unit.
    pub funding_amount: u64,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            app_name: "land-verification".to_string(),
            deployer_address: String::new(),
            funding_amount: 1_000_000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
