//! Tests for the game profile endpoints.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    Json,
};
use ratatoskr::{
    model::game_profile::{AddGameProfileDto, ChangeUsernameDto},
    server::controller::{
        game_profile::{add_game_profile, change_username, IDEMPOTENCY_KEY_HEADER},
        util::auth_user::AuthUser,
    },
};
use serde_json::json;

use super::*;
use crate::util::{json_body, send};

fn add_body(name: &str) -> Json<AddGameProfileDto> {
    Json(AddGameProfileDto {
        name: name.to_string(),
    })
}

fn rename_body(new_name: &str) -> Json<ChangeUsernameDto> {
    Json(ChangeUsernameDto {
        new_name: new_name.to_string(),
    })
}

mod add_game_profile {
    use super::*;

    /// Expect 200 with the new profile when the user has free capacity
    #[tokio::test]
    async fn returns_200_for_free_capacity() -> Result<(), TestError> {
        let test = TestBuilder::new().with_game_profile_tables().build().await?;
        let user = test.user().insert_user(1, "alice").await?;

        let result = add_game_profile(
            State(test.into_app_state()),
            AuthUser(user),
            HeaderMap::new(),
            add_body("alice_01"),
        )
        .await;

        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["name"], "alice_01");
        assert_eq!(body["user_id"], "1");
        assert!(body["id"].is_string());
        assert!(body.get("skin_library_id").is_none());

        Ok(())
    }

    /// Expect 503 once the quota is exhausted
    #[tokio::test]
    async fn returns_503_when_quota_exhausted() -> Result<(), TestError> {
        let test = TestBuilder::new().with_game_profile_tables().build().await?;
        let user = test.user().insert_user(1, "alice").await?;
        test.game_profile().insert_quota(1, 1, 1).await?;

        let result = add_game_profile(
            State(test.into_app_state()),
            AuthUser(user),
            HeaderMap::new(),
            add_body("bob_02"),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        Ok(())
    }

    /// Expect 400 for a name that fails validation
    #[tokio::test]
    async fn returns_400_for_invalid_name() -> Result<(), TestError> {
        let test = TestBuilder::new().with_game_profile_tables().build().await?;
        let user = test.user().insert_user(1, "alice").await?;

        let result = add_game_profile(
            State(test.into_app_state()),
            AuthUser(user),
            HeaderMap::new(),
            add_body("a b!"),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = json_body(resp).await;
        assert!(body["error"].as_str().unwrap().contains("a b!"));

        Ok(())
    }

    /// Expect 409 when another user already holds the name
    #[tokio::test]
    async fn returns_409_for_taken_name() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_game_profile_tables()
            .with_user(2, "bob")
            .with_profile(2, "taken_name")
            .build()
            .await?;
        let user = test.user().insert_user(1, "alice").await?;

        let result = add_game_profile(
            State(test.into_app_state()),
            AuthUser(user),
            HeaderMap::new(),
            add_body("taken_name"),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        Ok(())
    }

    /// Expect the same profile for a repeated Idempotency-Key header
    #[tokio::test]
    async fn replays_idempotency_key() -> Result<(), TestError> {
        let test = TestBuilder::new().with_game_profile_tables().build().await?;
        let user = test.user().insert_user(1, "alice").await?;
        let mut headers = HeaderMap::new();
        headers.insert(IDEMPOTENCY_KEY_HEADER, HeaderValue::from_static("retry-1"));

        let first = add_game_profile(
            State(test.into_app_state()),
            AuthUser(user.clone()),
            headers.clone(),
            add_body("alice_01"),
        )
        .await;
        let second = add_game_profile(
            State(test.into_app_state()),
            AuthUser(user),
            headers,
            add_body("alice_01"),
        )
        .await;

        let first = json_body(first.unwrap().into_response()).await;
        let second_resp = second.unwrap().into_response();
        assert_eq!(second_resp.status(), StatusCode::OK);
        let second = json_body(second_resp).await;
        assert_eq!(first["id"], second["id"]);
        assert_eq!(test.game_profile().count_ledger_entries().await?, 1);

        Ok(())
    }

    /// Expect 400 for a malformed Idempotency-Key header
    #[tokio::test]
    async fn returns_400_for_invalid_idempotency_key() -> Result<(), TestError> {
        let test = TestBuilder::new().with_game_profile_tables().build().await?;
        let user = test.user().insert_user(1, "alice").await?;
        let mut headers = HeaderMap::new();
        headers.insert(IDEMPOTENCY_KEY_HEADER, HeaderValue::from_static("a:b"));

        let result = add_game_profile(
            State(test.into_app_state()),
            AuthUser(user),
            headers,
            add_body("alice_01"),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(test.game_profile().count_profiles().await?, 0);

        Ok(())
    }

    /// Expect the full request path to resolve the token, create the user and allocate
    #[tokio::test]
    async fn allocates_through_router() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_game_profile_tables()
            .with_userinfo_endpoint(TEST_ACCESS_TOKEN, TEST_USER_ID, TEST_NICKNAME, 1)
            .build()
            .await?;

        let resp = send(
            test.into_router(),
            Method::POST,
            "/api/v1/game-profile",
            Some(TEST_ACCESS_TOKEN),
            Some(json!({ "name": "steve" })),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["user_id"], TEST_USER_ID.to_string());
        assert_eq!(body["name"], "steve");
        test.assert_mocks();

        Ok(())
    }

    /// Expect 401 without calling the identity provider when the header is missing
    #[tokio::test]
    async fn returns_401_without_bearer_token() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_game_profile_tables()
            .with_userinfo_endpoint(TEST_ACCESS_TOKEN, TEST_USER_ID, TEST_NICKNAME, 0)
            .build()
            .await?;

        let resp = send(
            test.into_router(),
            Method::POST,
            "/api/v1/game-profile",
            None,
            Some(json!({ "name": "steve" })),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(test.game_profile().count_profiles().await?, 0);
        test.assert_mocks();

        Ok(())
    }
}

mod change_username {
    use super::*;

    /// Expect 200 with the renamed profile
    #[tokio::test]
    async fn returns_200_for_free_name() -> Result<(), TestError> {
        let test = TestBuilder::new().with_game_profile_tables().build().await?;
        let user = test.user().insert_user(1, "alice").await?;
        let profile = test.game_profile().insert_profile(1, "alice_01").await?;

        let result = change_username(
            State(test.into_app_state()),
            AuthUser(user),
            Path(profile.id.to_string()),
            rename_body("alice_02"),
        )
        .await;

        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["id"], profile.id.to_string());
        assert_eq!(body["name"], "alice_02");

        Ok(())
    }

    /// Expect 400 when the path id is not numeric
    #[tokio::test]
    async fn returns_400_for_non_numeric_id() -> Result<(), TestError> {
        let test = TestBuilder::new().with_game_profile_tables().build().await?;
        let user = test.user().insert_user(1, "alice").await?;

        let result = change_username(
            State(test.into_app_state()),
            AuthUser(user),
            Path("abc".to_string()),
            rename_body("alice_02"),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }

    /// Expect 404 when the profile belongs to another user
    #[tokio::test]
    async fn returns_404_for_foreign_profile() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_game_profile_tables()
            .with_user(2, "bob")
            .build()
            .await?;
        let user = test.user().insert_user(1, "alice").await?;
        let profile = test.game_profile().insert_profile(2, "bob_01").await?;

        let result = change_username(
            State(test.into_app_state()),
            AuthUser(user),
            Path(profile.id.to_string()),
            rename_body("alice_02"),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        Ok(())
    }

    /// Expect 409 and both names unchanged when the name is held by another profile
    #[tokio::test]
    async fn returns_409_for_taken_name() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_game_profile_tables()
            .with_user(2, "bob")
            .build()
            .await?;
        let user = test.user().insert_user(1, "alice").await?;
        let profile_a = test.game_profile().insert_profile(1, "alice_01").await?;
        let profile_b = test.game_profile().insert_profile(2, "bob_01").await?;

        let result = change_username(
            State(test.into_app_state()),
            AuthUser(user),
            Path(profile_a.id.to_string()),
            rename_body("bob_01"),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let stored_a = test.game_profile().profile(profile_a.id).await?.unwrap();
        let stored_b = test.game_profile().profile(profile_b.id).await?.unwrap();
        assert_eq!(stored_a.name, "alice_01");
        assert_eq!(stored_b.name, "bob_01");

        Ok(())
    }
}
