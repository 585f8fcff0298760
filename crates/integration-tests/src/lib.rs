//! Integration tests for Roster.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p roster-integration-tests
//! ```
//!
//! Tests drive the full admin router in-process with `tower::ServiceExt`, so
//! no server or network is needed. Each [`TestContext`] owns its own console
//! task.
//!
//! # Test Categories
//!
//! - `admin_api` - JSON intent API
//! - `admin_screens` - HTML screens and form posts
//! - `admin_health` - Health checks, request IDs, static assets

use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use roster_admin::{config::AdminConfig, state::AppState};
use roster_core::{AdminConsole, ConsoleSnapshot, Intent};
use serde::{Serialize, de::DeserializeOwned};
use tower::ServiceExt;

/// Largest response body the helpers will buffer.
const BODY_LIMIT: usize = 1024 * 1024;

/// In-process admin application.
pub struct TestContext {
    app: Router,
}

impl TestContext {
    /// Admin with default configuration: mock records, permissive validation.
    #[must_use]
    pub fn new() -> Self {
        Self::with_env(&[])
    }

    /// Admin configured from the given variables.
    ///
    /// # Panics
    ///
    /// Panics if a variable does not parse.
    #[must_use]
    pub fn with_env(vars: &[(&str, &str)]) -> Self {
        let config = AdminConfig::from_lookup(|key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        })
        .expect("invalid test configuration");
        Self {
            app: roster_admin::app(AppState::new(config)),
        }
    }

    /// Admin wrapping an existing console.
    #[must_use]
    pub fn with_console(console: AdminConsole) -> Self {
        Self {
            app: roster_admin::app(AppState::with_console(AdminConfig::default(), console)),
        }
    }

    /// Send a request through the router.
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body exceeds the buffer limit.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), BODY_LIMIT)
            .await
            .expect("failed to read body");
        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// `GET path`.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(request("GET", path).body(Body::empty()).expect("valid request"))
            .await
    }

    /// `POST path` with an empty body.
    pub async fn post(&self, path: &str) -> TestResponse {
        self.send(request("POST", path).body(Body::empty()).expect("valid request"))
            .await
    }

    /// `POST path` with an urlencoded form. Pairs may repeat keys.
    pub async fn post_form(&self, path: &str, pairs: &[(&str, &str)]) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        self.send(
            request("POST", path)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .expect("valid request"),
        )
        .await
    }

    /// `POST path` with a JSON body.
    pub async fn post_json(&self, path: &str, body: &impl Serialize) -> TestResponse {
        let body = serde_json::to_vec(body).expect("serializable body");
        self.send(
            request("POST", path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .expect("valid request"),
        )
        .await
    }

    /// Apply one intent through `/api/intents`.
    pub async fn intent(&self, intent: &Intent) -> TestResponse {
        self.post_json("/api/intents", intent).await
    }

    /// Current console state from `/api/console`.
    ///
    /// # Panics
    ///
    /// Panics if the endpoint does not answer 200 with a snapshot.
    pub async fn snapshot(&self) -> ConsoleSnapshot {
        let response = self.get("/api/console").await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text());
        response.json()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

fn request(method: &str, path: &str) -> axum::http::request::Builder {
    Request::builder().method(method).uri(path)
}

/// Buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    /// Body as UTF-8 text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body decoded as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid JSON for `T`.
    #[must_use]
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("invalid JSON body ({e}): {}", self.text()))
    }

    /// `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }
}
