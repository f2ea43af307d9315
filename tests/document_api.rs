//! Integration tests for the document API client.

mod common;

use estate_orchestrator::config::schema::DocumentApiConfig;
use estate_orchestrator::documents::client::DocumentApiClient;
use estate_orchestrator::documents::types::ApiError;

fn config(token_addr: std::net::SocketAddr, api_addr: std::net::SocketAddr) -> DocumentApiConfig {
    DocumentApiConfig {
        token_url: format!("http://{}/oauth/token", token_addr),
        api_url: format!("http://{}/documents", api_addr),
        storage_base_url: "https://docs.example".to_string(),
        request_timeout_secs: 5,
    }
}

#[tokio::test]
async fn test_token_and_documents_happy_path() {
    let token_addr = common::start_api_backend(|method, path| {
        assert_eq!(method, "POST");
        assert_eq!(path, "/oauth/token");
        (200, r#"{"access_token": "tok-123"}"#.to_string())
    })
    .await;
    let api_addr = common::start_api_backend(|method, path| {
        assert_eq!(method, "GET");
        assert_eq!(path, "/documents");
        (
            200,
            r#"[{"hash": "abc123", "name": "deed"}, {"name": "no-hash"}]"#.to_string(),
        )
    })
    .await;

    let client = DocumentApiClient::new(&config(token_addr, api_addr)).unwrap();

    let token = client.fetch_access_token().await.unwrap();
    assert_eq!(token, "tok-123");

    let documents = client.fetch_documents(&token).await.unwrap();
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].hash.as_deref(), Some("abc123"));
    assert!(documents[1].hash.is_none());
}

#[tokio::test]
async fn test_non_2xx_token_response_is_status_error() {
    let token_addr =
        common::start_api_backend(|_, _| (401, r#"{"error": "invalid_client"}"#.to_string())).await;
    let api_addr = common::start_api_backend(|_, _| (200, "[]".to_string())).await;

    let client = DocumentApiClient::new(&config(token_addr, api_addr)).unwrap();
    let result = client.fetch_access_token().await;
    match result {
        Err(ApiError::Status { status, .. }) => assert_eq!(status, 401),
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_token_response_without_token_field() {
    let token_addr =
        common::start_api_backend(|_, _| (200, r#"{"token_type": "bearer"}"#.to_string())).await;
    let api_addr = common::start_api_backend(|_, _| (200, "[]".to_string())).await;

    let client = DocumentApiClient::new(&config(token_addr, api_addr)).unwrap();
    assert!(matches!(
        client.fetch_access_token().await,
        Err(ApiError::MissingToken)
    ));
}

#[tokio::test]
async fn test_unlisted_status_code_is_not_a_success() {
    // 503 is not one of the mock backend's named codes; it must still
    // reach the client as the failure it is.
    let token_addr =
        common::start_api_backend(|_, _| (503, r#"{"error": "down"}"#.to_string())).await;
    let api_addr = common::start_api_backend(|_, _| (200, "[]".to_string())).await;

    let client = DocumentApiClient::new(&config(token_addr, api_addr)).unwrap();
    match client.fetch_access_token().await {
        Err(ApiError::Status { status, .. }) => assert_eq!(status, 503),
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_api_is_transport_error() {
    let mut cfg = config(
        "127.0.0.1:1".parse().unwrap(),
        "127.0.0.1:1".parse().unwrap(),
    );
    cfg.request_timeout_secs = 1;
    let client = DocumentApiClient::new(&cfg).unwrap();
    assert!(matches!(
        client.fetch_access_token().await,
        Err(ApiError::Transport(_))
    ));
}
