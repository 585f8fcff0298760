//! Integration tests for health checks and shared middleware.

#![allow(clippy::unwrap_used)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use roster_admin::middleware::REQUEST_ID_HEADER;
use roster_integration_tests::TestContext;

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();
    let response = ctx.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "ok");
}

#[tokio::test]
async fn test_readiness_while_console_runs() {
    let ctx = TestContext::new();
    assert_eq!(ctx.get("/health/ready").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_every_response_carries_request_id() {
    let ctx = TestContext::new();

    let generated = ctx.get("/api/users").await;
    assert!(generated.headers.contains_key(REQUEST_ID_HEADER));

    let forwarded = ctx
        .send(
            Request::builder()
                .uri("/health")
                .header(REQUEST_ID_HEADER, "proxy-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(forwarded.headers[REQUEST_ID_HEADER], "proxy-42");

    let error = ctx.post("/users/404/edit").await;
    assert_eq!(error.status, StatusCode::NOT_FOUND);
    assert!(error.headers.contains_key(REQUEST_ID_HEADER));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let ctx = TestContext::new();
    assert_eq!(ctx.get("/settings").await.status, StatusCode::NOT_FOUND);
}
