//! Sequential workflow execution with fail-fast short-circuiting.
//!
//! # State Transitions
//! ```text
//! NotStarted → Running → Completed   (every step Confirmed)
//!                      → Aborted     (first TimedOut / Failed)
//! ```
//!
//! No rollback of already-confirmed steps is performed on a downstream
//! failure: once a ledger action is confirmed it is final. The partial
//! report is surfaced so the operator can decide on manual remediation.

use crate::lifecycle::Shutdown;
use crate::workflow::step::{StepContext, WorkflowStep};
use crate::workflow::types::{WorkflowReport, WorkflowState};

/// Runs an ordered sequence of steps, aggregating structured results.
#[derive(Debug, Default)]
pub struct Orchestrator {
    shutdown: Option<Shutdown>,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// As [`Self::new`], but cancellation aborts the run before the next
    /// step starts, even when the trigger fired before `run` was called.
    pub fn with_shutdown(shutdown: Shutdown) -> Self {
        Self {
            shutdown: Some(shutdown),
        }
    }

    /// Execute `steps` strictly in order against `ctx`.
    ///
    /// A step executes only after every preceding step reached a
    /// successful terminal result. On the first failure the remaining
    /// steps never run and the partial report is returned with state
    /// `Aborted`.
    pub async fn run(
        &self,
        label: &str,
        steps: &[WorkflowStep],
        ctx: &mut StepContext,
    ) -> WorkflowReport {
        let mut report = WorkflowReport::new(label);
        report.state = WorkflowState::Running;
        tracing::info!(
            run_id = %report.run_id,
            label = %label,
            steps = steps.len(),
            "Workflow started"
        );

        for step in steps {
            if self.shutdown.as_ref().is_some_and(|s| s.is_triggered()) {
                report.state = WorkflowState::Aborted;
                tracing::warn!(
                    run_id = %report.run_id,
                    label = %label,
                    next_step = step.name(),
                    "Cancellation requested, workflow aborted"
                );
                return report;
            }

            let result = step.execute(ctx).await;
            let succeeded = result.is_success();
            report.record(step.name(), result);

            if !succeeded {
                report.state = WorkflowState::Aborted;
                tracing::warn!(
                    run_id = %report.run_id,
                    label = %label,
                    failed_step = step.name(),
                    executed = report.entries.len(),
                    "Workflow aborted, remaining steps skipped"
                );
                return report;
            }
        }

        report.state = WorkflowState::Completed;
        tracing::info!(run_id = %report.run_id, label = %label, "Workflow completed");
        report
    }
}
