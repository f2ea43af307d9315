//! Ledger node REST client with timeout and error handling.
//!
//! # Responsibilities
//! - Query node state (`status`)
//! - Submit signed transaction bytes
//! - Look up pending-transaction info for issued handles
//! - Map pending info onto workflow confirmation states

use std::time::Duration;

use futures_util::future::BoxFuture;
use reqwest::header::HeaderValue;
use tokio::time::timeout;
use url::Url;

use crate::config::schema::LedgerConfig;
use crate::ledger::types::{LedgerError, LedgerResult, NodeStatus, PendingInfo, SubmitResponse};
use crate::workflow::poller::StatusSource;
use crate::workflow::types::{ConfirmationResult, StatusError, SubmissionHandle};

/// Auth header expected by the node.
const API_TOKEN_HEADER: &str = "X-Algo-API-Token";

/// REST client for one ledger node.
#[derive(Debug, Clone)]
pub struct LedgerClient {
    http: reqwest::Client,
    base_url: Url,
    api_token: String,
    timeout_duration: Duration,
}

impl LedgerClient {
    /// Create a client for the configured node endpoint.
    pub fn new(config: &LedgerConfig) -> LedgerResult<Self> {
        let base_url: Url = config.base_url.parse().map_err(|e| {
            LedgerError::Transport(format!("invalid node URL '{}': {}", config.base_url, e))
        })?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        tracing::info!(node_url = %base_url, "Ledger client initialized");

        Ok(Self {
            http,
            base_url,
            api_token: config.api_token.clone(),
            timeout_duration: Duration::from_secs(config.request_timeout_secs),
        })
    }

    fn endpoint(&self, path: &str) -> LedgerResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| LedgerError::Transport(format!("invalid endpoint path '{}': {}", path, e)))
    }

    /// Current node status, including the last committed round.
    pub async fn status(&self) -> LedgerResult<NodeStatus> {
        let url = self.endpoint("v2/status")?;
        let request = self
            .http
            .get(url)
            .header(API_TOKEN_HEADER, self.auth_header()?);
        self.execute(request).await
    }

    /// Submit signed transaction bytes.
    ///
    /// One external submission per call; the returned handle is the only
    /// record of it.
    pub async fn send_transaction(&self, signed_bytes: Vec<u8>) -> LedgerResult<SubmissionHandle> {
        let url = self.endpoint("v2/transactions")?;
        let request = self
            .http
            .post(url)
            .header(API_TOKEN_HEADER, self.auth_header()?)
            .header(reqwest::header::CONTENT_TYPE, "application/x-binary")
            .body(signed_bytes);

        let response: SubmitResponse = self.execute(request).await?;
        let handle = SubmissionHandle(response.tx_id);
        tracing::info!(handle = %handle, "Transaction submitted");
        Ok(handle)
    }

    /// Pending-transaction info for a previously issued handle.
    pub async fn pending_transaction_info(
        &self,
        handle: &SubmissionHandle,
    ) -> LedgerResult<PendingInfo> {
        let url = self.endpoint(&format!("v2/transactions/pending/{}", handle))?;
        let request = self
            .http
            .get(url)
            .header(API_TOKEN_HEADER, self.auth_header()?);
        self.execute(request).await
    }

    /// Whether the node answers its status endpoint.
    pub async fn is_healthy(&self) -> bool {
        self.status().await.is_ok()
    }

    fn auth_header(&self) -> LedgerResult<HeaderValue> {
        HeaderValue::from_str(&self.api_token)
            .map_err(|e| LedgerError::Transport(format!("invalid API token: {}", e)))
    }

    async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> LedgerResult<T> {
        // The timeout covers the full exchange, body read included; a
        // node stalling mid-body must not hang a poll attempt.
        let exchange = async {
            let response = request
                .send()
                .await
                .map_err(|e| LedgerError::Transport(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LedgerError::Rejected {
                    status: status.as_u16(),
                    body,
                });
            }

            response
                .json::<T>()
                .await
                .map_err(|e| LedgerError::Decode(e.to_string()))
        };

        match timeout(self.timeout_duration, exchange).await {
            Ok(result) => result,
            Err(_) => Err(LedgerError::Timeout(self.timeout_duration.as_secs())),
        }
    }
}

impl StatusSource for LedgerClient {
    fn poll_status<'a>(
        &'a self,
        handle: &'a SubmissionHandle,
    ) -> BoxFuture<'a, Result<ConfirmationResult, StatusError>> {
        Box::pin(async move {
            let info = self
                .pending_transaction_info(handle)
                .await
                .map_err(|e| StatusError(e.to_string()))?;
            Ok(confirmation_from_pending(&info))
        })
    }
}

/// Map pending-transaction info onto a confirmation state.
pub fn confirmation_from_pending(info: &PendingInfo) -> ConfirmationResult {
    if let Some(round) = info.confirmed_round {
        ConfirmationResult::Confirmed { round }
    } else if !info.pool_error.is_empty() {
        ConfirmationResult::Failed {
            cause: info.pool_error.clone(),
        }
    } else {
        ConfirmationResult::Pending
    }
}
