//! Ledger node integration.
//!
//! # Responsibilities
//! - Speak the node's REST API (status, submit, pending-transaction info)
//! - Encode and sign transactions
//! - Map node answers onto workflow confirmation states

pub mod client;
pub mod signer;
pub mod types;

pub use client::LedgerClient;
pub use signer::TxnSigner;
pub use types::{LedgerError, LedgerResult, SignatureError};
