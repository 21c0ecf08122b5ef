//! Client credentials flow against a mocked Entra ID token endpoint

use pwready::config::GraphCredentials;
use pwready::error::ReadinessError;
use pwready::graph::auth::{GraphAuth, TokenSource};
use pwready::readiness::ReadinessPolicy;
use pwready::service::ReadinessService;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TENANT_ID: &str = "contoso.onmicrosoft.com";
const USER_ID: &str = "4562bcc8-c436-4f95-b7c0-4f8ce89dca5e";

fn credentials() -> GraphCredentials {
    GraphCredentials {
        tenant_id: TENANT_ID.into(),
        client_id: "client-id".into(),
        client_secret: "client-secret".into(),
    }
}

fn token_path() -> String {
    format!("/{}/oauth2/v2.0/token", TENANT_ID)
}

/// Test the acquired token is the bearer used on Graph calls
#[tokio::test]
async fn test_client_credentials_token_reaches_graph() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(token_path()))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "graph-token",
            "token_type": "Bearer",
            "expires_in": 3599
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v1.0/users/{}", USER_ID)))
        .and(header("authorization", "Bearer graph-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "displayName": "Adele Vance"
        })))
        .expect(1)
        .mount(&server)
        .await;

    for listing in ["methods", "phoneMethods"] {
        Mock::given(method("GET"))
            .and(path(format!("/v1.0/users/{}/authentication/{}", USER_ID, listing)))
            .and(header("authorization", "Bearer graph-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": [] })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let auth = GraphAuth::with_authority(credentials(), &server.uri());
    let service = ReadinessService::new(
        TokenSource::ClientCredentials(auth),
        ReadinessPolicy::default(),
    )
    .with_graph_base_url(format!("{}/v1.0", server.uri()));

    let report = service.evaluate(USER_ID).await.unwrap();
    assert_eq!(report.user.name(), "Adele Vance");
    assert_eq!(report.score, 0);
}

/// Test a rejected token request is fatal and Graph is never called
#[tokio::test]
async fn test_token_endpoint_rejection_is_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(token_path()))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_client",
            "error_description": "AADSTS7000215: Invalid client secret provided."
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let auth = GraphAuth::with_authority(credentials(), &format!("{}/", server.uri()));
    let service = ReadinessService::new(
        TokenSource::ClientCredentials(auth),
        ReadinessPolicy::default(),
    )
    .with_graph_base_url(format!("{}/v1.0", server.uri()));

    let err = service.evaluate(USER_ID).await.unwrap_err();
    assert!(matches!(err, ReadinessError::AuthError(_)));
}
