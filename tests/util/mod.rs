//! Helpers for building application state and requests in integration tests.

use axum::{
    body::{to_bytes, Body},
    http::{header::AUTHORIZATION, Method, Request, Response},
    Router,
};
use ratatoskr::server::{model::app::AppState, router};
use ratatoskr_test_utils::TestContext;
use serde_json::Value;
use tower::ServiceExt;

/// Extension trait for TestContext to create the application state and router
pub trait TestContextExt {
    fn into_app_state(&self) -> AppState;

    fn into_router(&self) -> Router {
        router::routes().with_state(self.into_app_state())
    }
}

impl TestContextExt for TestContext {
    fn into_app_state(&self) -> AppState {
        self.to_app_state()
    }
}

/// Send one request through the router, with an optional bearer token and JSON body
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut request = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        request = request.header(AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    app.oneshot(request).await.unwrap()
}

/// Response body parsed as JSON
pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    serde_json::from_slice(&bytes).unwrap()
}
