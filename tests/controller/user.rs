//! Tests for the user info endpoint.

use axum::{
    http::{Method, StatusCode},
    response::IntoResponse,
};
use ratatoskr::server::controller::{user::get_user_info, util::auth_user::AuthUser};

use super::*;
use crate::util::{json_body, send};

/// Expect 200 with the user's fields rendered with a string id
#[tokio::test]
async fn returns_200_for_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let user = test.user().insert_user(42, "alice").await?;

    let result = get_user_info(AuthUser(user)).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["id"], "42");
    assert_eq!(body["username"], "alice");
    assert_eq!(body["role_name"], "PLAYER");
    assert_eq!(body["has_ban"], false);

    Ok(())
}

/// Expect the first sign-in to create the user from the provider's identity
#[tokio::test]
async fn creates_user_on_first_request() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_userinfo_endpoint(TEST_ACCESS_TOKEN, TEST_USER_ID, TEST_NICKNAME, 1)
        .build()
        .await?;

    let resp = send(
        test.into_router(),
        Method::GET,
        "/api/v1/user/info",
        Some(TEST_ACCESS_TOKEN),
        None,
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["id"], TEST_USER_ID.to_string());
    assert_eq!(body["username"], TEST_NICKNAME);
    assert_eq!(body["email"], TEST_EMAIL);
    assert!(body["phone"].is_null());
    test.assert_mocks();

    Ok(())
}

/// Expect 401 when the identity provider rejects the token
#[tokio::test]
async fn returns_401_for_rejected_token() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_userinfo_error_endpoint("expired_token", 401, 1)
        .build()
        .await?;

    let resp = send(
        test.into_router(),
        Method::GET,
        "/api/v1/user/info",
        Some("expired_token"),
        None,
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(resp).await;
    assert!(body["error"].is_string());
    test.assert_mocks();

    Ok(())
}

/// Expect 401 when no Authorization header is sent
#[tokio::test]
async fn returns_401_for_missing_token() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;

    let resp = send(
        test.into_router(),
        Method::GET,
        "/api/v1/user/info",
        None,
        None,
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
