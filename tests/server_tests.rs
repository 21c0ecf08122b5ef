//! Router tests for the readiness API

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use pwready::graph::auth::TokenSource;
use pwready::readiness::ReadinessPolicy;
use pwready::server::{handlers::CLIENT_PRINCIPAL_ID_HEADER, router, AppState};
use pwready::service::ReadinessService;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_ID: &str = "4562bcc8-c436-4f95-b7c0-4f8ce89dca5e";

fn state(graph_base_url: &str) -> AppState {
    AppState::new(
        ReadinessService::new(
            TokenSource::Static("test-token".into()),
            ReadinessPolicy::default(),
        )
        .with_graph_base_url(graph_base_url),
    )
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_methods_without_principal_header_is_401() {
    let app = router(state("http://127.0.0.1:9/v1.0"));

    let response = app
        .oneshot(Request::builder().uri("/api/methods").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains(CLIENT_PRINCIPAL_ID_HEADER));
}

#[tokio::test]
async fn test_methods_returns_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1.0/users/{}", USER_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "displayName": "Adele Vance"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v1.0/users/{}/authentication/methods", USER_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{
                "@odata.type": "#microsoft.graph.microsoftAuthenticatorAuthenticationMethod",
                "isPhoneSignInEnabled": true
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v1.0/users/{}/authentication/phoneMethods", USER_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": [] })))
        .mount(&server)
        .await;

    let app = router(state(&format!("{}/v1.0", server.uri())));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/methods")
                .header(CLIENT_PRINCIPAL_ID_HEADER, USER_ID)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["displayName"], "Adele Vance");
    assert_eq!(body["hasMFA"], true);
    assert_eq!(body["score"], 40);
}

#[tokio::test]
async fn test_methods_graph_failure_is_500() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1.0/users/{}", USER_ID)))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = router(state(&format!("{}/v1.0", server.uri())));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/methods")
                .header(CLIENT_PRINCIPAL_ID_HEADER, USER_ID)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_log_user_progress_is_accepted() {
    let app = router(state("http://127.0.0.1:9/v1.0"));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/logUserProgress")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "user": "Adele Vance",
                        "score": 60,
                        "hasAuthenticator": true,
                        "hasPhone": true,
                        "hasMFA": true,
                        "hasWHfB": false
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_health() {
    let app = router(state("http://127.0.0.1:9/v1.0"));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "ok" }));
}
