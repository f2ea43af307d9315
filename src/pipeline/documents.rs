//! Document verification pipeline.
//!
//! For each document exposing a hash, runs the dependent chain
//! [create land-verification asset → transfer land token]. Documents are
//! independent units of work: a failed chain is reported and the pipeline
//! continues with the next document. Within one chain, failure
//! short-circuits the remainder.

use serde::Serialize;

use crate::config::schema::OrchestratorConfig;
use crate::documents::client::DocumentApiClient;
use crate::documents::types::ApiError;
use crate::ledger::client::LedgerClient;
use crate::ledger::signer::TxnSigner;
use crate::lifecycle::Shutdown;
use crate::workflow::orchestrator::Orchestrator;
use crate::workflow::poller::ConfirmationPoller;
use crate::workflow::step::{boxed, StepContext, WorkflowStep};
use crate::workflow::submitter::ActionSubmitter;
use crate::workflow::types::{ActionKind, ActionRequest, ConfirmationResult, WorkflowReport};

/// Aggregate outcome of one pipeline run, printed as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRunSummary {
    /// One report per document that entered the chain.
    pub reports: Vec<WorkflowReport>,
    /// Documents skipped because they carried no hash.
    pub skipped: usize,
    /// Total documents returned by the API for this run.
    pub documents_fetched: usize,
    /// Whether cancellation stopped the run before all documents ran.
    pub cancelled: bool,
}

impl DocumentRunSummary {
    fn new() -> Self {
        Self {
            reports: Vec::new(),
            skipped: 0,
            documents_fetched: 0,
            cancelled: false,
        }
    }

    /// Whether the run saw at least one document and every chain
    /// completed. An empty fetch or a cancelled run does not count as
    /// success.
    pub fn all_completed(&self) -> bool {
        self.documents_fetched > 0
            && !self.cancelled
            && self.reports.iter().all(|r| r.is_completed())
    }
}

/// Drives the verify-then-transfer chain for every fetched document.
pub struct DocumentPipeline {
    config: OrchestratorConfig,
    documents: DocumentApiClient,
    submitter: ActionSubmitter,
    poller: ConfirmationPoller<LedgerClient>,
    buyer: TxnSigner,
    seller: TxnSigner,
    shutdown: Shutdown,
}

impl DocumentPipeline {
    pub fn new(
        config: OrchestratorConfig,
        ledger: LedgerClient,
        documents: DocumentApiClient,
        buyer: TxnSigner,
        seller: TxnSigner,
        shutdown: Shutdown,
    ) -> Self {
        let poller = ConfirmationPoller::new(
            ledger.clone(),
            config.poller.max_attempts,
            std::time::Duration::from_millis(config.poller.interval_ms),
        );
        Self {
            submitter: ActionSubmitter::new(ledger),
            poller,
            config,
            documents,
            buyer,
            seller,
            shutdown,
        }
    }

    /// Fetch documents and run one chain per document hash.
    ///
    /// An API failure before any chain starts is fatal for the run; a
    /// failed chain only fails that document.
    pub async fn run(&self) -> Result<DocumentRunSummary, ApiError> {
        let mut summary = DocumentRunSummary::new();

        if self.shutdown.is_triggered() {
            tracing::warn!("Cancellation requested before the run started");
            summary.cancelled = true;
            return Ok(summary);
        }

        let access_token = self.documents.fetch_access_token().await?;
        let documents = self.documents.fetch_documents(&access_token).await?;
        summary.documents_fetched = documents.len();
        if documents.is_empty() {
            tracing::error!("No documents found");
            return Ok(summary);
        }

        let steps = vec![self.create_verification_asset_step(), self.transfer_token_step()];
        let orchestrator = Orchestrator::with_shutdown(self.shutdown.clone());

        for document in documents {
            if self.shutdown.is_triggered() {
                tracing::warn!("Cancellation requested, remaining documents not processed");
                summary.cancelled = true;
                break;
            }

            let Some(hash) = document.hash else {
                tracing::warn!(name = ?document.name, "Document without hash, skipping");
                summary.skipped += 1;
                continue;
            };

            let mut ctx = StepContext::new();
            ctx.insert("document_hash", &hash);

            let report = orchestrator.run(&hash, &steps, &mut ctx).await;
            if !report.is_completed() {
                tracing::warn!(
                    document_hash = %hash,
                    "Document chain failed, continuing with next document"
                );
            }
            summary.reports.push(report);
        }

        Ok(summary)
    }

    /// Create the land-verification asset, signed by the buyer.
    fn create_verification_asset_step(&self) -> WorkflowStep {
        let submitter = self.submitter.clone();
        let poller = self.poller.clone();
        let buyer = self.buyer.clone();
        let shutdown = self.shutdown.clone();
        let storage_base = self.config.document_api.storage_base_url.clone();

        WorkflowStep::from_fn("create-verification-asset", move |ctx: &mut StepContext| {
            let submitter = submitter.clone();
            let poller = poller.clone();
            let buyer = buyer.clone();
            let shutdown = shutdown.clone();
            let storage_base = storage_base.clone();
            boxed(async move {
                let Some(hash) = ctx.get("document_hash").map(str::to_string) else {
                    return ConfirmationResult::Failed {
                        cause: "no document hash in context".to_string(),
                    };
                };

                let request = ActionRequest::new(ActionKind::AssetCreate)
                    .field("sender", buyer.address())
                    .field("asset_name", "Land Verification")
                    .field("unit_name", "LAND")
                    .field("total", "1")
                    .field("asset_url", format!("{}/{}", storage_base, hash));

                let handle = match submitter.submit(&request, &buyer).await {
                    Ok(handle) => handle,
                    Err(e) => {
                        return ConfirmationResult::Failed {
                            cause: e.to_string(),
                        }
                    }
                };

                let result = poller
                    .await_confirmation_cancellable(&handle, Some(shutdown.subscribe()))
                    .await;
                if let ConfirmationResult::Confirmed { round } = &result {
                    ctx.insert("verification_round", round.to_string());
                    ctx.insert("verified_hash", hash);
                }
                result
            })
        })
    }

    /// Transfer the land token from seller to buyer, signed by the seller.
    fn transfer_token_step(&self) -> WorkflowStep {
        let submitter = self.submitter.clone();
        let poller = self.poller.clone();
        let seller = self.seller.clone();
        let shutdown = self.shutdown.clone();
        let buyer_address = self.config.parties.buyer_address.clone();
        let land_token_id = self.config.parties.land_token_id;

        WorkflowStep::from_fn("transfer-land-token", move |ctx: &mut StepContext| {
            let submitter = submitter.clone();
            let poller = poller.clone();
            let seller = seller.clone();
            let shutdown = shutdown.clone();
            let buyer_address = buyer_address.clone();
            boxed(async move {
                // Ownership must not move before verification confirmed.
                if ctx.get("verified_hash").is_none() {
                    return ConfirmationResult::Failed {
                        cause: "verification asset not confirmed".to_string(),
                    };
                }

                let request = ActionRequest::new(ActionKind::AssetTransfer)
                    .field("sender", seller.address())
                    .field("receiver", buyer_address)
                    .field("amount", "1")
                    .field("asset_id", land_token_id.to_string());

                let handle = match submitter.submit(&request, &seller).await {
                    Ok(handle) => handle,
                    Err(e) => {
                        return ConfirmationResult::Failed {
                            cause: e.to_string(),
                        }
                    }
                };

                poller
                    .await_confirmation_cancellable(&handle, Some(shutdown.subscribe()))
                    .await
            })
        })
    }
}
