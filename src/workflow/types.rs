//! Workflow-level types and error definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Kind of ledger action a request describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    /// Create a new asset (e.g., a land-verification record).
    AssetCreate,
    /// Transfer an existing asset between two accounts.
    AssetTransfer,
    /// Plain value transfer (used to fund a deployed application).
    Payment,
    /// Invoke a method on a deployed application.
    ContractCall,
}

/// Semantic description of an action to submit.
///
/// Carries no identity until submitted; the ledger assigns a
/// [`SubmissionHandle`] on acceptance. Payload fields are an opaque
/// ordered key→value mapping interpreted by the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub kind: ActionKind,
    pub fields: BTreeMap<String, String>,
}

impl ActionRequest {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            fields: BTreeMap::new(),
        }
    }

    /// Add a payload field (builder style).
    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// Opaque identifier issued by the ledger upon submission.
///
/// Immutable once issued; used solely as a lookup key for confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionHandle(pub String);

impl std::fmt::Display for SubmissionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SubmissionHandle {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Tagged outcome of waiting for an action to finalize.
///
/// `Pending` is the only non-terminal state; every other variant ends
/// polling for the handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ConfirmationResult {
    /// Finalized by the ledger in the given round.
    Confirmed { round: u64 },
    /// Not yet finalized; triggers another poll.
    Pending,
    /// Attempt budget exhausted without a terminal answer.
    TimedOut,
    /// The ledger rejected the action or the step could not complete.
    Failed { cause: String },
}

impl ConfirmationResult {
    /// Whether no further polling should occur for this result.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ConfirmationResult::Pending)
    }

    /// A step succeeds iff its result is `Confirmed`.
    pub fn is_success(&self) -> bool {
        matches!(self, ConfirmationResult::Confirmed { .. })
    }
}

impl std::fmt::Display for ConfirmationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfirmationResult::Confirmed { round } => write!(f, "confirmed in round {}", round),
            ConfirmationResult::Pending => write!(f, "pending"),
            ConfirmationResult::TimedOut => write!(f, "timed out"),
            ConfirmationResult::Failed { cause } => write!(f, "failed: {}", cause),
        }
    }
}

/// Errors raised while building or submitting a signed action.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Request construction failed (missing or invalid field).
    #[error("invalid action request: {0}")]
    Build(String),

    /// Network or transport fault before the ledger answered.
    #[error("submission transport error: {0}")]
    Transport(String),

    /// The ledger refused the action outright.
    #[error("submission rejected: {0}")]
    Rejected(String),
}

/// Transport-level failure while querying a handle's status.
///
/// Consumed by the poller as a failed attempt, never surfaced to the
/// caller of `await_confirmation`.
#[derive(Debug, Error)]
#[error("status query failed: {0}")]
pub struct StatusError(pub String);

/// Lifecycle of one orchestration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowState {
    NotStarted,
    Running,
    /// Every step reached `Confirmed`.
    Completed,
    /// Some step reached `TimedOut` or `Failed`, or submission errored.
    Aborted,
}

/// One executed step and its terminal outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub step: String,
    pub result: ConfirmationResult,
}

/// Ordered record of one orchestration run.
///
/// Append-only; ends either when all steps succeed or at the first
/// failure. Serialized as JSON for operator consumption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowReport {
    /// Unique id for this run, attached to all log lines.
    pub run_id: Uuid,
    /// Human-readable label (e.g., the document hash being processed).
    pub label: String,
    pub state: WorkflowState,
    pub entries: Vec<ReportEntry>,
}

impl WorkflowReport {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            label: label.into(),
            state: WorkflowState::NotStarted,
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, step: &str, result: ConfirmationResult) {
        self.entries.push(ReportEntry {
            step: step.to_string(),
            result,
        });
    }

    pub fn is_completed(&self) -> bool {
        self.state == WorkflowState::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(ConfirmationResult::Confirmed { round: 7 }.is_terminal());
        assert!(ConfirmationResult::TimedOut.is_terminal());
        assert!(ConfirmationResult::Failed {
            cause: "rejected".to_string()
        }
        .is_terminal());
        assert!(!ConfirmationResult::Pending.is_terminal());
    }

    #[test]
    fn test_only_confirmed_is_success() {
        assert!(ConfirmationResult::Confirmed { round: 1 }.is_success());
        assert!(!ConfirmationResult::Pending.is_success());
        assert!(!ConfirmationResult::TimedOut.is_success());
    }

    #[test]
    fn test_request_builder() {
        let request = ActionRequest::new(ActionKind::AssetTransfer)
            .field("sender", "SELLER")
            .field("receiver", "BUYER")
            .field("amount", "1");
        assert_eq!(request.get("sender"), Some("SELLER"));
        assert_eq!(request.get("missing"), None);
        assert_eq!(request.fields.len(), 3);
    }

    #[test]
    fn test_report_json_shape() {
        let mut report = WorkflowReport::new("doc-abc123");
        report.state = WorkflowState::Completed;
        report.record("create-verification-asset", ConfirmationResult::Confirmed { round: 42 });

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["state"], "completed");
        assert_eq!(json["entries"][0]["step"], "create-verification-asset");
        assert_eq!(json["entries"][0]["result"]["status"], "confirmed");
        assert_eq!(json["entries"][0]["result"]["round"], 42);
    }
}
