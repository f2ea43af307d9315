//! Signed-action submission.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::ledger::client::LedgerClient;
use crate::ledger::signer::TxnSigner;
use crate::ledger::types::{LedgerError, SignedTxn, TxnPayload, FLAT_FEE, VALIDITY_WINDOW};
use crate::workflow::types::{ActionKind, ActionRequest, SubmissionError, SubmissionHandle};

/// Payload fields every request of a given kind must carry.
fn required_fields(kind: ActionKind) -> &'static [&'static str] {
    match kind {
        ActionKind::AssetCreate => &["sender", "asset_name", "unit_name", "total", "asset_url"],
        ActionKind::AssetTransfer => &["sender", "receiver", "amount", "asset_id"],
        ActionKind::Payment => &["sender", "receiver", "amount"],
        ActionKind::ContractCall => &["sender", "method"],
    }
}

/// Builds, signs and submits actions to the ledger.
#[derive(Debug, Clone)]
pub struct ActionSubmitter {
    ledger: LedgerClient,
}

impl ActionSubmitter {
    pub fn new(ledger: LedgerClient) -> Self {
        Self { ledger }
    }

    /// Submit `request` signed by `signer` and return the issued handle.
    ///
    /// NOT idempotent: each call performs exactly one external submission
    /// and there is no request-level idempotency key. Callers must not
    /// retry blindly without verifying that no prior handle was already
    /// issued, as a blind retry can duplicate the side effect (e.g. a
    /// double transfer).
    pub async fn submit(
        &self,
        request: &ActionRequest,
        signer: &TxnSigner,
    ) -> Result<SubmissionHandle, SubmissionError> {
        for field in required_fields(request.kind) {
            if request.get(field).is_none() {
                return Err(SubmissionError::Build(format!(
                    "missing required field '{}' for {:?}",
                    field, request.kind
                )));
            }
        }

        // Validity window anchored at the node's last committed round.
        let status = self.ledger.status().await.map_err(transport)?;

        let payload = TxnPayload {
            sender: signer.address().to_string(),
            fee: FLAT_FEE,
            first_valid: status.last_round,
            last_valid: status.last_round + VALIDITY_WINDOW,
            kind: kind_tag(request.kind).to_string(),
            fields: request.fields.clone(),
        };

        let message = payload
            .canonical_bytes()
            .map_err(|e| SubmissionError::Build(e.to_string()))?;
        let signature = signer.sign(&message);

        let signed = SignedTxn {
            txn: payload,
            sig: BASE64.encode(signature.to_bytes()),
            key: signer.public_key_b64(),
        };
        let bytes = signed
            .encode()
            .map_err(|e| SubmissionError::Build(e.to_string()))?;

        let handle = self
            .ledger
            .send_transaction(bytes)
            .await
            .map_err(transport)?;

        tracing::info!(
            handle = %handle,
            kind = ?request.kind,
            sender = %signer.address(),
            first_valid = status.last_round,
            "Action submitted"
        );
        Ok(handle)
    }
}

fn kind_tag(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::AssetCreate => "asset-create",
        ActionKind::AssetTransfer => "asset-transfer",
        ActionKind::Payment => "payment",
        ActionKind::ContractCall => "contract-call",
    }
}

fn transport(e: LedgerError) -> SubmissionError {
    match e {
        LedgerError::Rejected { status, body } => {
            SubmissionError::Rejected(format!("status {}: {}", status, body))
        }
        other => SubmissionError::Transport(other.to_string()),
    }
}
