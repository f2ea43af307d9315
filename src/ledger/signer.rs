//! Transaction signing.
//!
//! # Security
//! - Private keys are loaded ONLY from environment variables
//! - Keys are never logged or serialized

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ed25519_dalek::{Signature, Signer, SigningKey};

use crate::ledger::types::SignatureError;

/// Signer bound to one ledger account.
#[derive(Clone)]
pub struct TxnSigner {
    key: SigningKey,
    address: String,
}

impl TxnSigner {
    /// Create a signer from a hex-encoded 32-byte seed.
    ///
    /// `address` is the account the key controls; the key itself is never
    /// logged.
    pub fn from_hex(address: impl Into<String>, key_hex: &str) -> Result<Self, SignatureError> {
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);
        let bytes = hex::decode(key_hex)
            .map_err(|e| SignatureError::InvalidKey(format!("not valid hex: {}", e)))?;
        let seed: [u8; 32] = bytes
            .try_into()
            .map_err(|_| SignatureError::InvalidKey("seed must be exactly 32 bytes".to_string()))?;

        let signer = Self {
            key: SigningKey::from_bytes(&seed),
            address: address.into(),
        };
        tracing::info!(address = %signer.address, "Signer initialized");
        Ok(signer)
    }

    /// Load a signer whose key lives in the environment variable `var`.
    pub fn from_env(address: impl Into<String>, var: &str) -> Result<Self, SignatureError> {
        let key_hex =
            std::env::var(var).map_err(|_| SignatureError::MissingKey(var.to_string()))?;
        Self::from_hex(address, &key_hex)
    }

    /// The account address this signer acts for.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Sign canonical transaction bytes.
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.key.sign(message)
    }

    /// Base64-encoded public key, placed in the signed envelope.
    pub fn public_key_b64(&self) -> String {
        BASE64.encode(self.key.verifying_key().as_bytes())
    }
}

impl std::fmt::Debug for TxnSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material deliberately omitted.
        f.debug_struct("TxnSigner")
            .field("address", &self.address)
            .finish()
    }
}
