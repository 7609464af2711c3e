//! Tests for the request timeout layer.

use std::time::Duration;

use axum::{
    http::{Method, StatusCode},
    routing::get,
    Router,
};
use ratatoskr::server::{model::app::AppState, router::with_timeout};

use super::*;
use crate::util::send;

fn timed_router(test: &TestContext) -> Router {
    let router: Router<AppState> = Router::new()
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "done"
            }),
        )
        .route("/fast", get(|| async { "done" }));

    with_timeout(router, Duration::from_millis(20)).with_state(test.into_app_state())
}

/// Expect 408 when a handler runs past the timeout
#[tokio::test]
async fn returns_408_for_slow_handler() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let response = send(timed_router(&test), Method::GET, "/slow", None, None).await;

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

    Ok(())
}

/// Expect 200 when a handler finishes within the timeout
#[tokio::test]
async fn passes_fast_handler_through() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let response = send(timed_router(&test), Method::GET, "/fast", None, None).await;

    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}
