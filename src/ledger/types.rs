//! Ledger wire types and error definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Flat fee per transaction in the ledger's smallest unit.
pub const FLAT_FEE: u64 = 1_000;

/// How many rounds a transaction stays valid after its first-valid round.
pub const VALIDITY_WINDOW: u64 = 1_000;

/// Errors that can occur while talking to the ledger node.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Request failed at the transport level.
    #[error("ledger transport error: {0}")]
    Transport(String),

    /// Request timed out.
    #[error("ledger request timed out after {0} seconds")]
    Timeout(u64),

    /// Node answered with a non-2xx status.
    #[error("ledger rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Response body could not be decoded.
    #[error("ledger response decode error: {0}")]
    Decode(String),

    /// Transaction encoding failed before submission.
    #[error("transaction encoding error: {0}")]
    Encode(String),
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Invalid key material. Fatal: retrying with the same key cannot succeed.
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("environment variable {0} not set")]
    MissingKey(String),

    #[error("invalid signing key: {0}")]
    InvalidKey(String),
}

/// Answer of the node's status endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeStatus {
    #[serde(rename = "last-round")]
    pub last_round: u64,
}

/// Answer of the node's submission endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    #[serde(rename = "txId")]
    pub tx_id: String,
}

/// Pending-transaction info for a submitted handle.
///
/// `confirmed_round` present means the action is final; a non-empty
/// `pool_error` means the node dropped it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PendingInfo {
    #[serde(rename = "confirmed-round")]
    pub confirmed_round: Option<u64>,

    #[serde(rename = "pool-error", default)]
    pub pool_error: String,

    /// Set on confirmed application-create transactions.
    #[serde(rename = "application-index")]
    pub application_index: Option<u64>,

    /// Base64-encoded application log entries; the first one carries a
    /// contract call's return value.
    #[serde(default)]
    pub logs: Vec<String>,
}

/// Unsigned transaction body as submitted to the node.
///
/// Field order is fixed by the `BTreeMap` so the signed byte
/// representation is canonical.
#[derive(Debug, Clone, Serialize)]
pub struct TxnPayload {
    pub sender: String,
    pub fee: u64,
    pub first_valid: u64,
    pub last_valid: u64,
    pub kind: String,
    pub fields: BTreeMap<String, String>,
}

impl TxnPayload {
    /// Canonical bytes over which the signature is computed.
    pub fn canonical_bytes(&self) -> LedgerResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| LedgerError::Encode(e.to_string()))
    }
}

/// Signed transaction envelope.
#[derive(Debug, Clone, Serialize)]
pub struct SignedTxn {
    pub txn: TxnPayload,
    /// Base64-encoded ed25519 signature over the canonical payload bytes.
    pub sig: String,
    /// Base64-encoded public key of the signer.
    pub key: String,
}

impl SignedTxn {
    pub fn encode(&self) -> LedgerResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| LedgerError::Encode(e.to_string()))
    }
}
