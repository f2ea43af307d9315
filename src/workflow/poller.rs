//! Bounded confirmation polling.
//!
//! # Responsibilities
//! - Query a status source at a fixed interval until a terminal result
//! - Consume transport errors as failed attempts, never raising them
//! - Return `TimedOut` once the attempt budget is exhausted
//! - Honor an external cancellation signal during the inter-attempt wait
//!
//! # Design Decisions
//! - The caller always gets an answer within
//!   `max_attempts * interval` (plus per-query timeout) wall-clock time;
//!   bounded polling trades completeness for liveness.
//! - Retries live here and nowhere else; submitters and steps never retry.

use std::time::Duration;

use futures_util::future::BoxFuture;
use tokio::sync::broadcast;
use tokio::time::sleep;

use crate::workflow::types::{ConfirmationResult, StatusError, SubmissionHandle};

/// External source answering "what happened to this handle?".
///
/// Implemented by the ledger client; test doubles script a sequence of
/// answers.
pub trait StatusSource: Send + Sync {
    fn poll_status<'a>(
        &'a self,
        handle: &'a SubmissionHandle,
    ) -> BoxFuture<'a, Result<ConfirmationResult, StatusError>>;
}

/// Polls an external status source until a terminal condition is observed
/// or the retry budget runs out.
#[derive(Debug, Clone)]
pub struct ConfirmationPoller<S> {
    source: S,
    max_attempts: u32,
    interval: Duration,
}

impl<S: StatusSource> ConfirmationPoller<S> {
    /// Create a poller.
    ///
    /// `max_attempts` below 1 is clamped to 1 so at least one query is
    /// always performed.
    pub fn new(source: S, max_attempts: u32, interval: Duration) -> Self {
        Self {
            source,
            max_attempts: max_attempts.max(1),
            interval,
        }
    }

    /// Wait for `handle` to reach a terminal state.
    ///
    /// Performs up to `max_attempts` queries, sleeping `interval` between
    /// them. A query transport error is logged and counted as a consumed
    /// attempt. A terminal result returns immediately with no further
    /// waiting.
    pub async fn await_confirmation(&self, handle: &SubmissionHandle) -> ConfirmationResult {
        self.await_confirmation_cancellable(handle, None).await
    }

    /// As [`Self::await_confirmation`], but a message on `cancel` during
    /// the inter-attempt wait makes the call return `TimedOut` promptly
    /// instead of completing its full attempt budget.
    pub async fn await_confirmation_cancellable(
        &self,
        handle: &SubmissionHandle,
        mut cancel: Option<broadcast::Receiver<()>>,
    ) -> ConfirmationResult {
        for attempt in 1..=self.max_attempts {
            match self.source.poll_status(handle).await {
                Ok(result) if result.is_terminal() => {
                    tracing::debug!(
                        handle = %handle,
                        attempt = attempt,
                        result = %result,
                        "Terminal confirmation state observed"
                    );
                    return result;
                }
                Ok(_) => {
                    tracing::debug!(handle = %handle, attempt = attempt, "Action pending");
                }
                Err(e) => {
                    // Transport faults consume an attempt; the ledger may
                    // still confirm the action on a later query.
                    tracing::warn!(
                        handle = %handle,
                        attempt = attempt,
                        error = %e,
                        "Status query failed, counting as consumed attempt"
                    );
                }
            }

            // No wait after the final attempt.
            if attempt < self.max_attempts {
                match cancel.as_mut() {
                    Some(rx) => {
                        tokio::select! {
                            _ = sleep(self.interval) => {}
                            _ = rx.recv() => {
                                tracing::info!(
                                    handle = %handle,
                                    attempt = attempt,
                                    "Cancellation received while waiting for confirmation"
                                );
                                return ConfirmationResult::TimedOut;
                            }
                        }
                    }
                    None => sleep(self.interval).await,
                }
            }
        }

        tracing::warn!(
            handle = %handle,
            max_attempts = self.max_attempts,
            "Action not confirmed within attempt budget"
        );
        ConfirmationResult::TimedOut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use std::time::Instant;

    use crate::lifecycle::Shutdown;

    /// Scripted status source: pops one answer per query and counts calls.
    struct ScriptedSource {
        answers: Mutex<VecDeque<Result<ConfirmationResult, StatusError>>>,
        queries: AtomicU32,
    }

    impl ScriptedSource {
        fn new(answers: Vec<Result<ConfirmationResult, StatusError>>) -> Self {
            Self {
                answers: Mutex::new(answers.into()),
                queries: AtomicU32::new(0),
            }
        }

        fn query_count(&self) -> u32 {
            self.queries.load(Ordering::SeqCst)
        }
    }

    impl StatusSource for &ScriptedSource {
        fn poll_status<'a>(
            &'a self,
            _handle: &'a SubmissionHandle,
        ) -> BoxFuture<'a, Result<ConfirmationResult, StatusError>> {
            Box::pin(async move {
                self.queries.fetch_add(1, Ordering::SeqCst);
                self.answers
                    .lock()
                    .unwrap()
                    .pop_front()
                    .unwrap_or(Ok(ConfirmationResult::Pending))
            })
        }
    }

    fn handle() -> SubmissionHandle {
        SubmissionHandle("TXID123".to_string())
    }

    #[tokio::test]
    async fn test_never_confirmed_exhausts_exact_budget() {
        let source = ScriptedSource::new(vec![]);
        let poller = ConfirmationPoller::new(&source, 4, Duration::from_millis(0));

        let result = poller.await_confirmation(&handle()).await;
        assert_eq!(result, ConfirmationResult::TimedOut);
        assert_eq!(source.query_count(), 4);
    }

    #[tokio::test]
    async fn test_early_confirmation_stops_polling() {
        let source = ScriptedSource::new(vec![
            Ok(ConfirmationResult::Pending),
            Ok(ConfirmationResult::Confirmed { round: 9 }),
        ]);
        let poller = ConfirmationPoller::new(&source, 10, Duration::from_millis(0));

        let result = poller.await_confirmation(&handle()).await;
        assert_eq!(result, ConfirmationResult::Confirmed { round: 9 });
        assert_eq!(source.query_count(), 2);
    }

    #[tokio::test]
    async fn test_pending_pending_confirmed_scenario() {
        // maxAttempts=3, interval=0: Pending, Pending, Confirmed{5}.
        let source = ScriptedSource::new(vec![
            Ok(ConfirmationResult::Pending),
            Ok(ConfirmationResult::Pending),
            Ok(ConfirmationResult::Confirmed { round: 5 }),
        ]);
        let poller = ConfirmationPoller::new(&source, 3, Duration::from_millis(0));

        let result = poller.await_confirmation(&handle()).await;
        assert_eq!(result, ConfirmationResult::Confirmed { round: 5 });
        assert_eq!(source.query_count(), 3);
    }

    #[tokio::test]
    async fn test_transport_errors_consumed_not_raised() {
        // Errors on attempts 1 and 2, confirmation on attempt 3, budget 5.
        let source = ScriptedSource::new(vec![
            Err(StatusError("connection refused".to_string())),
            Err(StatusError("connection reset".to_string())),
            Ok(ConfirmationResult::Confirmed { round: 12 }),
        ]);
        let poller = ConfirmationPoller::new(&source, 5, Duration::from_millis(0));

        let result = poller.await_confirmation(&handle()).await;
        assert_eq!(result, ConfirmationResult::Confirmed { round: 12 });
        assert_eq!(source.query_count(), 3);
    }

    #[tokio::test]
    async fn test_already_confirmed_handle_is_idempotent_to_poll() {
        // A source that is a pure function of the handle keeps answering
        // Confirmed; polling twice observes the same result both times.
        struct ConstantSource(AtomicU32);
        impl StatusSource for &ConstantSource {
            fn poll_status<'a>(
                &'a self,
                _handle: &'a SubmissionHandle,
            ) -> BoxFuture<'a, Result<ConfirmationResult, StatusError>> {
                Box::pin(async move {
                    self.0.fetch_add(1, Ordering::SeqCst);
                    Ok(ConfirmationResult::Confirmed { round: 77 })
                })
            }
        }

        let source = ConstantSource(AtomicU32::new(0));
        let poller = ConfirmationPoller::new(&source, 5, Duration::from_millis(0));

        let first = poller.await_confirmation(&handle()).await;
        let second = poller.await_confirmation(&handle()).await;
        assert_eq!(first, ConfirmationResult::Confirmed { round: 77 });
        assert_eq!(second, first);
        // One query per call; a terminal answer never triggers more polls.
        assert_eq!(source.0.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_is_terminal() {
        let source = ScriptedSource::new(vec![Ok(ConfirmationResult::Failed {
            cause: "pool error".to_string(),
        })]);
        let poller = ConfirmationPoller::new(&source, 5, Duration::from_millis(0));

        let result = poller.await_confirmation(&handle()).await;
        assert!(matches!(result, ConfirmationResult::Failed { .. }));
        assert_eq!(source.query_count(), 1);
    }

    #[tokio::test]
    async fn test_cancellation_interrupts_wait() {
        let source = ScriptedSource::new(vec![]);
        // Long interval; without cancellation this would take ~20s.
        let poller = ConfirmationPoller::new(&source, 5, Duration::from_secs(5));

        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();
        tokio::spawn(async move {
            sleep(Duration::from_millis(50)).await;
            shutdown.trigger();
        });

        let started = Instant::now();
        let result = poller
            .await_confirmation_cancellable(&handle(), Some(rx))
            .await;
        assert_eq!(result, ConfirmationResult::TimedOut);
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(source.query_count(), 1);
    }

    #[tokio::test]
    async fn test_zero_attempts_clamped_to_one() {
        let source = ScriptedSource::new(vec![Ok(ConfirmationResult::Confirmed { round: 1 })]);
        let poller = ConfirmationPoller::new(&source, 0, Duration::from_millis(0));

        let result = poller.await_confirmation(&handle()).await;
        assert_eq!(result, ConfirmationResult::Confirmed { round: 1 });
        assert_eq!(source.query_count(), 1);
    }
}
