//! Transactional workflow executor.
//!
//! # Responsibilities
//! - Describe ledger actions semantically ([`types::ActionRequest`])
//! - Submit signed actions exactly once ([`submitter::ActionSubmitter`])
//! - Poll for confirmation within a bounded budget ([`poller::ConfirmationPoller`])
//! - Run ordered steps with fail-fast short-circuiting ([`orchestrator::Orchestrator`])

pub mod orchestrator;
pub mod poller;
pub mod step;
pub mod submitter;
pub mod types;

pub use orchestrator::Orchestrator;
pub use poller::ConfirmationPoller;
pub use step::{StepContext, WorkflowStep};
pub use submitter::ActionSubmitter;
pub use types::{
    ActionKind, ActionRequest, ConfirmationResult, SubmissionError, SubmissionHandle,
    WorkflowReport, WorkflowState,
};
