//! Document API HTTP client.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use url::Url;

use crate::config::schema::DocumentApiConfig;
use crate::documents::types::{ApiError, Document, TokenResponse};

/// Client for the external document service.
#[derive(Debug, Clone)]
pub struct DocumentApiClient {
    http: reqwest::Client,
    token_url: Url,
    api_url: Url,
}

impl DocumentApiClient {
    pub fn new(config: &DocumentApiConfig) -> Result<Self, ApiError> {
        let token_url: Url = config
            .token_url
            .parse()
            .map_err(|e| ApiError::Transport(format!("invalid token URL: {}", e)))?;
        let api_url: Url = config
            .api_url
            .parse()
            .map_err(|e| ApiError::Transport(format!("invalid API URL: {}", e)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            token_url,
            api_url,
        })
    }

    /// Fetch an access token via the client-credentials grant.
    pub async fn fetch_access_token(&self) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.token_url.clone())
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let response = check_status(response).await?;
        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        match token.access_token {
            Some(token) if !token.is_empty() => {
                tracing::info!("Access token obtained");
                Ok(token)
            }
            _ => Err(ApiError::MissingToken),
        }
    }

    /// Fetch the user's documents with bearer auth.
    pub async fn fetch_documents(&self, access_token: &str) -> Result<Vec<Document>, ApiError> {
        let response = self
            .http
            .get(self.api_url.clone())
            .header(AUTHORIZATION, format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let response = check_status(response).await?;
        let documents: Vec<Document> = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        tracing::info!(count = documents.len(), "Documents fetched");
        Ok(documents)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}
