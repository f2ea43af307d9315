//! Configuration management.
//!
//! # Responsibilities
//! - Define the configuration schema (serde structs)
//! - Load TOML configuration from disk
//! - Validate semantically before the orchestrator accepts it
//!
//! Private keys never appear in the file; they are read from environment
//! variables at startup (see [`crate::ledger::signer`]).

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::OrchestratorConfig;
pub use validation::{validate_config, ValidationError};
