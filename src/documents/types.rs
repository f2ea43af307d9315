//! Document API wire types and errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the document API.
///
/// Local to one fetch; the document pipeline logs them and moves on where
/// no ordering dependency exists.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request failed at the transport level.
    #[error("document API transport error: {0}")]
    Transport(String),

    /// API answered with a non-2xx status.
    #[error("document API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Token endpoint answered without an access token.
    #[error("no access token in token endpoint response")]
    MissingToken,

    /// Response body could not be decoded.
    #[error("document API response decode error: {0}")]
    Decode(String),
}

/// One document as exposed by the API. Only the hash matters to the
/// verification workflow; everything else is carried for logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub hash: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}

/// Token endpoint answer.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_hash_optional() {
        let with_hash: Document = serde_json::from_str(r#"{"hash": "abc", "name": "deed"}"#).unwrap();
        assert_eq!(with_hash.hash.as_deref(), Some("abc"));

        let without: Document = serde_json::from_str(r#"{"name": "deed"}"#).unwrap();
        assert!(without.hash.is_none());
    }
}
