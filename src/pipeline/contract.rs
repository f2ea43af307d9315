//! Contract deployment and interaction pipeline.
//!
//! Mirrors the deployment workflow: deploy the land-verification app,
//! fund its escrow, submit the document hash, read it back, then
//! transfer the land token. One dependent chain, fail-fast throughout.

use crate::config::schema::OrchestratorConfig;
use crate::contract::client::ContractClient;
use crate::workflow::orchestrator::Orchestrator;
use crate::workflow::step::{boxed, StepContext, WorkflowStep};
use crate::workflow::types::{ConfirmationResult, SubmissionError, WorkflowReport};

/// Drives the five-step contract workflow.
pub struct ContractPipeline {
    contract: ContractClient,
    config: OrchestratorConfig,
}

impl ContractPipeline {
    pub fn new(contract: ContractClient, config: OrchestratorConfig) -> Self {
        Self { contract, config }
    }

    /// Run the full chain for one document hash.
    pub async fn run(&self, document_hash: &str) -> WorkflowReport {
        let steps = vec![
            self.deploy_step(),
            self.fund_step(),
            self.submit_verification_step(),
            self.get_verified_hash_step(),
            self.transfer_step(),
        ];

        let mut ctx = StepContext::new();
        ctx.insert("document_hash", document_hash);

        Orchestrator::with_shutdown(self.contract.shutdown().clone())
            .run(&self.config.contract.app_name, &steps, &mut ctx)
            .await
    }

    fn deploy_step(&self) -> WorkflowStep {
        let contract = self.contract.clone();
        WorkflowStep::from_fn("deploy-application", move |ctx: &mut StepContext| {
            let contract = contract.clone();
            boxed(async move {
                let outcome = match contract.deploy().await {
                    Ok(outcome) => outcome,
                    Err(e) => return failed(e),
                };
                if !outcome.result.is_success() {
                    return outcome.result;
                }
                match outcome.application_index {
                    Some(app_id) => {
                        ctx.insert("app_id", app_id.to_string());
                        outcome.result
                    }
                    None => ConfirmationResult::Failed {
                        cause: "confirmed create carried no application index".to_string(),
                    },
                }
            })
        })
    }

    fn fund_step(&self) -> WorkflowStep {
        let contract = self.contract.clone();
        WorkflowStep::from_fn("fund-application", move |ctx: &mut StepContext| {
            let contract = contract.clone();
            boxed(async move {
                let Some(app_id) = app_id_from(ctx) else {
                    return missing_app_id();
                };
                match contract.fund(app_id).await {
                    Ok(outcome) => outcome.result,
                    Err(e) => failed(e),
                }
            })
        })
    }

    fn submit_verification_step(&self) -> WorkflowStep {
        let contract = self.contract.clone();
        WorkflowStep::from_fn("submit-verification", move |ctx: &mut StepContext| {
            let contract = contract.clone();
            boxed(async move {
                let Some(app_id) = app_id_from(ctx) else {
                    return missing_app_id();
                };
                let Some(hash) = ctx.get("document_hash").map(str::to_string) else {
                    return ConfirmationResult::Failed {
                        cause: "no document hash in context".to_string(),
                    };
                };
                match contract.submit_verification(app_id, &hash).await {
                    Ok(outcome) => outcome.result,
                    Err(e) => failed(e),
                }
            })
        })
    }

    fn get_verified_hash_step(&self) -> WorkflowStep {
        let contract = self.contract.clone();
        WorkflowStep::from_fn("get-verified-hash", move |ctx: &mut StepContext| {
            let contract = contract.clone();
            boxed(async move {
                let Some(app_id) = app_id_from(ctx) else {
                    return missing_app_id();
                };
                let outcome = match contract.get_verified_hash(app_id).await {
                    Ok(outcome) => outcome,
                    Err(e) => return failed(e),
                };
                if let Some(verified) = &outcome.return_value {
                    tracing::info!(verified_hash = %verified, "Contract reports verified hash");
                    ctx.insert("verified_hash", verified.clone());
                }
                outcome.result
            })
        })
    }

    fn transfer_step(&self) -> WorkflowStep {
        let contract = self.contract.clone();
        let land_token_id = self.config.parties.land_token_id;
        let seller = self.config.parties.seller_address.clone();
        let buyer = self.config.parties.buyer_address.clone();
        WorkflowStep::from_fn("transfer-land-token", move |ctx: &mut StepContext| {
            let contract = contract.clone();
            let seller = seller.clone();
            let buyer = buyer.clone();
            boxed(async move {
                let Some(app_id) = app_id_from(ctx) else {
                    return missing_app_id();
                };
                match contract
                    .transfer_land_token(app_id, land_token_id, &seller, &buyer)
                    .await
                {
                    Ok(outcome) => outcome.result,
                    Err(e) => failed(e),
                }
            })
        })
    }
}

fn app_id_from(ctx: &StepContext) -> Option<u64> {
    ctx.get("app_id").and_then(|id| id.parse().ok())
}

fn missing_app_id() -> ConfirmationResult {
    ConfirmationResult::Failed {
        cause: "no application id in context".to_string(),
    }
}

fn failed(e: SubmissionError) -> ConfirmationResult {
    ConfirmationResult::Failed {
        cause: e.to_string(),
    }
}
