//! Typed client for the deployed land-verification application.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::config::schema::ContractConfig;
use crate::ledger::client::LedgerClient;
use crate::ledger::signer::TxnSigner;
use crate::lifecycle::Shutdown;
use crate::workflow::poller::ConfirmationPoller;
use crate::workflow::submitter::ActionSubmitter;
use crate::workflow::types::{
    ActionKind, ActionRequest, ConfirmationResult, SubmissionError, SubmissionHandle,
};

/// Result of one contract interaction: the underlying transaction
/// confirmation plus whatever the call returned.
#[derive(Debug, Clone)]
pub struct CallOutcome {
    pub handle: SubmissionHandle,
    pub result: ConfirmationResult,
    /// Decoded first application log entry, if the call produced one.
    pub return_value: Option<String>,
    /// App id assigned by a confirmed application-create transaction.
    pub application_index: Option<u64>,
}

/// Client for the land-verification application, signing as the deployer.
#[derive(Debug, Clone)]
pub struct ContractClient {
    ledger: LedgerClient,
    submitter: ActionSubmitter,
    poller: ConfirmationPoller<LedgerClient>,
    deployer: TxnSigner,
    config: ContractConfig,
    shutdown: Shutdown,
}

impl ContractClient {
    pub fn new(
        ledger: LedgerClient,
        poller: ConfirmationPoller<LedgerClient>,
        deployer: TxnSigner,
        config: ContractConfig,
        shutdown: Shutdown,
    ) -> Self {
        Self {
            submitter: ActionSubmitter::new(ledger.clone()),
            ledger,
            poller,
            deployer,
            config,
            shutdown,
        }
    }

    /// The cancellation signal this client's calls honor.
    pub fn shutdown(&self) -> &Shutdown {
        &self.shutdown
    }

    /// The application's escrow address, derived from its id.
    pub fn app_address(app_id: u64) -> String {
        BASE64.encode(format!("appID{}", app_id))
    }

    /// Deploy the application. The app id is read from the confirmed
    /// transaction's application index.
    pub async fn deploy(&self) -> Result<CallOutcome, SubmissionError> {
        let request = ActionRequest::new(ActionKind::ContractCall)
            .field("sender", self.deployer.address())
            .field("method", "create")
            .field("app_name", &self.config.app_name);
        let outcome = self.submit_and_confirm(request).await?;
        if let Some(app_id) = outcome.application_index {
            tracing::info!(app_id = app_id, app_name = %self.config.app_name, "Application deployed");
        }
        Ok(outcome)
    }

    /// Fund the application's escrow account for initialization.
    pub async fn fund(&self, app_id: u64) -> Result<CallOutcome, SubmissionError> {
        let request = ActionRequest::new(ActionKind::Payment)
            .field("sender", self.deployer.address())
            .field("receiver", Self::app_address(app_id))
            .field("amount", self.config.funding_amount.to_string());
        self.submit_and_confirm(request).await
    }

    /// Submit a document hash for verification.
    pub async fn submit_verification(
        &self,
        app_id: u64,
        document_hash: &str,
    ) -> Result<CallOutcome, SubmissionError> {
        let request = self
            .method_call(app_id, "submit_verification")
            .field("document_hash", document_hash);
        self.submit_and_confirm(request).await
    }

    /// Read back the verified document hash.
    pub async fn get_verified_hash(&self, app_id: u64) -> Result<CallOutcome, SubmissionError> {
        let request = self.method_call(app_id, "get_verified_hash");
        self.submit_and_confirm(request).await
    }

    /// Transfer the land token from seller to buyer once verified.
    pub async fn transfer_land_token(
        &self,
        app_id: u64,
        land_token_id: u64,
        seller: &str,
        buyer: &str,
    ) -> Result<CallOutcome, SubmissionError> {
        let request = self
            .method_call(app_id, "transfer_land_token")
            .field("land_token_id", land_token_id.to_string())
            .field("seller", seller)
            .field("buyer", buyer);
        self.submit_and_confirm(request).await
    }

    fn method_call(&self, app_id: u64, method: &str) -> ActionRequest {
        ActionRequest::new(ActionKind::ContractCall)
            .field("sender", self.deployer.address())
            .field("app_id", app_id.to_string())
            .field("method", method)
    }

    async fn submit_and_confirm(
        &self,
        request: ActionRequest,
    ) -> Result<CallOutcome, SubmissionError> {
        let handle = self.submitter.submit(&request, &self.deployer).await?;
        let result = self
            .poller
            .await_confirmation_cancellable(&handle, Some(self.shutdown.subscribe()))
            .await;

        let mut outcome = CallOutcome {
            handle: handle.clone(),
            result,
            return_value: None,
            application_index: None,
        };

        // The return value and app index only exist once confirmed; a
        // lookup failure here does not undo the confirmation.
        if outcome.result.is_success() {
            match self.ledger.pending_transaction_info(&handle).await {
                Ok(info) => {
                    outcome.application_index = info.application_index;
                    outcome.return_value = info
                        .logs
                        .first()
                        .and_then(|log| BASE64.decode(log).ok())
                        .and_then(|bytes| String::from_utf8(bytes).ok());
                }
                Err(e) => {
                    tracing::warn!(
                        handle = %handle,
                        error = %e,
                        "Confirmed, but reading call results failed"
                    );
                }
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_address_is_deterministic() {
        assert_eq!(
            ContractClient::app_address(123_456),
            ContractClient::app_address(123_456)
        );
        assert_ne!(
            ContractClient::app_address(1),
            ContractClient::app_address(2)
        );
    }
}
