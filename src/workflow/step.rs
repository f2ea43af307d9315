//! Named units of work within a workflow.

use std::collections::BTreeMap;

use futures_util::future::BoxFuture;

use crate::workflow::types::ConfirmationResult;

/// Values threaded between steps of one workflow run.
///
/// Earlier steps publish outputs (a document hash, a deployed app id, a
/// verified value) that later steps consume.
#[derive(Debug, Clone, Default)]
pub struct StepContext {
    values: BTreeMap<String, String>,
}

impl StepContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Box a step future for dynamic dispatch.
///
/// Lets step closures be written as `|ctx| boxed(async move { .. })`.
pub fn boxed<'a, F>(fut: F) -> BoxFuture<'a, ConfirmationResult>
where
    F: std::future::Future<Output = ConfirmationResult> + Send + 'a,
{
    Box::pin(fut)
}

/// The work a step performs, expressed as a boxed async closure over the
/// shared context.
pub trait StepAction: Send + Sync {
    fn run<'a>(&'a self, ctx: &'a mut StepContext) -> BoxFuture<'a, ConfirmationResult>;
}

impl<F> StepAction for F
where
    F: for<'a> Fn(&'a mut StepContext) -> BoxFuture<'a, ConfirmationResult> + Send + Sync,
{
    fn run<'a>(&'a self, ctx: &'a mut StepContext) -> BoxFuture<'a, ConfirmationResult> {
        self(ctx)
    }
}

/// A named unit of work wrapping one submit-and-confirm round trip.
///
/// Constructed before orchestration starts and executed exactly once.
/// Performs no retries itself; bounded retrying lives in the poller.
pub struct WorkflowStep {
    name: String,
    action: Box<dyn StepAction>,
}

impl WorkflowStep {
    pub fn new(name: impl Into<String>, action: Box<dyn StepAction>) -> Self {
        Self {
            name: name.into(),
            action,
        }
    }

    /// Build a step from an async closure.
    pub fn from_fn<F>(name: impl Into<String>, f: F) -> Self
    where
        F: for<'a> Fn(&'a mut StepContext) -> BoxFuture<'a, ConfirmationResult>
            + Send
            + Sync
            + 'static,
    {
        Self::new(name, Box::new(f))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the step once and log its terminal outcome.
    pub async fn execute(&self, ctx: &mut StepContext) -> ConfirmationResult {
        tracing::info!(step = %self.name, "Executing workflow step");
        let result = self.action.run(ctx).await;
        if result.is_success() {
            tracing::info!(step = %self.name, result = %result, "Step confirmed");
        } else {
            tracing::warn!(step = %self.name, result = %result, "Step failed");
        }
        result
    }
}

impl std::fmt::Debug for WorkflowStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowStep")
            .field("name", &self.name)
            .finish()
    }
}
