//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (attempt budget ≥ 1, timeouts > 0)
//! - Fail fast before any submission is attempted
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: OrchestratorConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use url::Url;

use crate::config::schema::OrchestratorConfig;

/// One semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a loaded configuration, collecting every problem found.
pub fn validate_config(config: &OrchestratorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.parties.buyer_address.is_empty() {
        errors.push(ValidationError::new("parties.buyer_address", "must be set"));
    }
    if config.parties.seller_address.is_empty() {
        errors.push(ValidationError::new("parties.seller_address", "must be set"));
    }
    if config.parties.land_token_id == 0 {
        errors.push(ValidationError::new(
            "parties.land_token_id",
            "must be a nonzero asset id",
        ));
    }

    check_url(&mut errors, "document_api.token_url", &config.document_api.token_url);
    check_url(&mut errors, "document_api.api_url", &config.document_api.api_url);
    check_url(
        &mut errors,
        "document_api.storage_base_url",
        &config.document_api.storage_base_url,
    );
    if config.document_api.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "document_api.request_timeout_secs",
            "must be greater than zero",
        ));
    }

    check_url(&mut errors, "ledger.base_url", &config.ledger.base_url);
    if config.ledger.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "ledger.request_timeout_secs",
            "must be greater than zero",
        ));
    }

    if config.poller.max_attempts == 0 {
        errors.push(ValidationError::new(
            "poller.max_attempts",
            "must be at least 1",
        ));
    }

    if config.contract.app_name.is_empty() {
        errors.push(ValidationError::new("contract.app_name", "must be set"));
    }
    if config.contract.funding_amount == 0 {
        errors.push(ValidationError::new(
            "contract.funding_amount",
            "must be greater than zero",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if value.is_empty() {
        errors.push(ValidationError::new(field, "must be set"));
    } else if Url::parse(value).is_err() {
        errors.push(ValidationError::new(field, format!("'{}' is not a valid URL", value)));
    }
}
