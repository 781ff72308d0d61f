//! Integration tests for RegistryClient.
//!
//! Uses wiremock for both the registry and its token service. Tests cover the
//! challenge/token/retry sequence, token reuse, the strict and lenient ping
//! policies, and protocol errors raised by malformed challenges.

use std::sync::Arc;

use dockhub_registry::{ClientConfig, PingPolicy, RegistryClient, RegistryError, ReqwestTransport};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn challenge_for(mock_server: &MockServer) -> String {
    format!(
        r#"Bearer realm="{}/token",service="registry.test""#,
        mock_server.uri()
    )
}

fn create_test_client(mock_server: &MockServer, policy: PingPolicy) -> RegistryClient {
    let config = ClientConfig::new(&format!("{}/", mock_server.uri()))
        .expect("invalid root URL")
        .with_ping_policy(policy);
    RegistryClient::new(config).expect("failed to create client")
}

async fn mount_token(mock_server: &MockServer, token: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path("/token"))
        .and(query_param("service", "registry.test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": token,
            "expires_in": 300,
        })))
        .expect(times)
        .mount(mock_server)
        .await;
}

async fn mount_challenge(mock_server: &MockServer, times: u64) {
    Mock::given(method("GET"))
        .and(path("/v2/"))
        .respond_with(
            ResponseTemplate::new(401)
                .insert_header("www-authenticate", challenge_for(mock_server).as_str())
                .set_body_json(json!({
                    "errors": [{
                        "code": "UNAUTHORIZED",
                        "message": "authentication required",
                        "detail": null,
                    }]
                })),
        )
        .expect(times)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_ping_open_registry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, PingPolicy::Strict);
    client.ping().await.expect("ping failed");
    assert_eq!(client.token().await, None);
}

#[tokio::test]
async fn test_ping_answers_challenge() {
    let mock_server = MockServer::start().await;

    // Mounted first so that the authenticated retry matches it.
    Mock::given(method("GET"))
        .and(path("/v2/"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_challenge(&mock_server, 1).await;
    mount_token(&mock_server, "secret-token", 1).await;

    let client = create_test_client(&mock_server, PingPolicy::Strict);
    client.ping().await.expect("ping failed");

    assert_eq!(client.token().await.as_deref(), Some("secret-token"));
}

#[tokio::test]
async fn test_client_with_custom_reqwest_client() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/"))
        .and(header("user-agent", "custom-agent/1.0"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let http = reqwest::Client::builder()
        .user_agent("custom-agent/1.0")
        .build()
        .expect("failed to build reqwest client");
    let config = ClientConfig::new(&format!("{}/", mock_server.uri()))
        .expect("invalid root URL")
        .with_ping_policy(PingPolicy::Strict);
    let client = RegistryClient::with_transport(config, Arc::new(ReqwestTransport::from_client(http)))
        .expect("failed to create client");

    client.ping().await.expect("ping failed");
}

#[tokio::test]
async fn test_token_reused_across_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&mock_server)
        .await;
    mount_challenge(&mock_server, 1).await;
    mount_token(&mock_server, "secret-token", 1).await;

    let client = create_test_client(&mock_server, PingPolicy::Strict);
    client.ping().await.expect("first ping failed");

    let url = client
        .repository_url("library/ubuntu")
        .expect("invalid name")
        .join("tags/list")
        .expect("invalid URL");
    let response = client.get(&url).await.expect("get failed");
    assert_eq!(response.status.as_u16(), 200);
}

#[tokio::test]
async fn test_second_unauthorized_is_not_retried() {
    let mock_server = MockServer::start().await;

    mount_challenge(&mock_server, 2).await;
    mount_token(&mock_server, "rejected-token", 1).await;

    let client = create_test_client(&mock_server, PingPolicy::Lenient);
    let response = client
        .get(&client.endpoint().api())
        .await
        .expect("get failed");
    assert_eq!(response.status.as_u16(), 401);
}

#[tokio::test]
async fn test_lenient_ping_accepts_second_unauthorized() {
    let mock_server = MockServer::start().await;

    mount_challenge(&mock_server, 2).await;
    mount_token(&mock_server, "rejected-token", 1).await;

    let client = create_test_client(&mock_server, PingPolicy::Lenient);
    assert!(client.ping().await.is_ok());
}

#[tokio::test]
async fn test_strict_ping_rejects_second_unauthorized() {
    let mock_server = MockServer::start().await;

    mount_challenge(&mock_server, 2).await;
    mount_token(&mock_server, "rejected-token", 1).await;

    let client = create_test_client(&mock_server, PingPolicy::Strict);
    let err = client.ping().await.expect_err("ping should fail");

    assert!(err.is_protocol());
    assert!(err.to_string().contains("authentication required"));
}

#[tokio::test]
async fn test_strict_ping_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, PingPolicy::Strict);
    let err = client.ping().await.expect_err("ping should fail");

    assert!(matches!(err, RegistryError::ProtocolNotSupported { .. }));
}

#[tokio::test]
async fn test_lenient_ping_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, PingPolicy::Lenient);
    assert!(client.ping().await.is_ok());
}

#[tokio::test]
async fn test_challenge_without_bearer_scheme() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/"))
        .respond_with(
            ResponseTemplate::new(401).insert_header("www-authenticate", r#"Basic realm="registry""#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, PingPolicy::Lenient);
    let err = client.ping().await.expect_err("ping should fail");

    assert!(err.is_protocol());
    assert!(err.to_string().contains("unrecognized authentication mechanism"));
}

#[tokio::test]
async fn test_challenge_header_missing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, PingPolicy::Lenient);
    let err = client.ping().await.expect_err("ping should fail");

    assert_eq!(
        err.to_string(),
        "Protocol error: no WWW-Authenticate header in response"
    );
}

#[tokio::test]
async fn test_token_response_without_token() {
    let mock_server = MockServer::start().await;

    mount_challenge(&mock_server, 1).await;
    Mock::given(method("GET"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "x" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, PingPolicy::Lenient);
    let err = client.ping().await.expect_err("ping should fail");

    assert_eq!(err.to_string(), "Protocol error: no token in token response");
    assert_eq!(client.token().await, None);
}

#[tokio::test]
async fn test_unreachable_registry() {
    let config = ClientConfig::new("http://127.0.0.1:9/").expect("invalid root URL");
    let client = RegistryClient::new(config).expect("failed to create client");

    let err = client.ping().await.expect_err("ping should fail");
    assert!(matches!(err, RegistryError::Transport { .. }));
}
