use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        game_profile::{AddGameProfileDto, ChangeUsernameDto, GameProfileDto},
    },
    server::{
        controller::util::auth_user::AuthUser,
        error::{game_profile::GameProfileError, Error},
        model::app::AppState,
        service::game_profile::GameProfileService,
    },
};

pub static GAME_PROFILE_TAG: &str = "game-profile";

/// Header carrying the caller-supplied nonce for idempotent allocation
pub const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";

/// Allocate a new game profile from the caller's quota
///
/// Repeating the request with the same `Idempotency-Key` header returns the
/// profile created by the first request instead of allocating again.
#[utoipa::path(
    post,
    path = "/api/v1/game-profile",
    tag = GAME_PROFILE_TAG,
    security(("bearer" = [])),
    params(
        ("Idempotency-Key" = Option<String>, Header, description = "1-64 characters of A-Z, a-z, 0-9, '_' or '-'")
    ),
    request_body = AddGameProfileDto,
    responses(
        (status = 200, description = "Success when allocating a game profile", body = GameProfileDto),
        (status = 400, description = "Invalid profile name or idempotency key", body = ErrorDto),
        (status = 401, description = "Missing or rejected bearer token", body = ErrorDto),
        (status = 404, description = "Quota row missing after creation attempt", body = ErrorDto),
        (status = 409, description = "Profile name or UUID already taken", body = ErrorDto),
        (status = 503, description = "Game profile quota exhausted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_game_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    headers: HeaderMap,
    Json(body): Json<AddGameProfileDto>,
) -> Result<impl IntoResponse, Error> {
    let nonce = match headers.get(IDEMPOTENCY_KEY_HEADER) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| GameProfileError::InvalidIdempotencyKey)?,
        ),
        None => None,
    };

    let profile = GameProfileService::new(&state.store, &state.snowflake)
        .allocate_profile(user.id, &body.name, nonce)
        .await?;

    Ok((StatusCode::OK, Json(GameProfileDto::from(profile))))
}

/// Rename one of the caller's game profiles
#[utoipa::path(
    patch,
    path = "/api/v1/game-profile/{profile_id}/username",
    tag = GAME_PROFILE_TAG,
    security(("bearer" = [])),
    params(
        ("profile_id" = String, Path, description = "ID of the profile to rename")
    ),
    request_body = ChangeUsernameDto,
    responses(
        (status = 200, description = "Success when renaming the profile", body = GameProfileDto),
        (status = 400, description = "Invalid profile ID or name", body = ErrorDto),
        (status = 401, description = "Missing or rejected bearer token", body = ErrorDto),
        (status = 404, description = "Profile not found or not owned by the caller", body = ErrorDto),
        (status = 409, description = "Profile name already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn change_username(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(profile_id): Path<String>,
    Json(body): Json<ChangeUsernameDto>,
) -> Result<impl IntoResponse, Error> {
    let profile_id: i64 = profile_id
        .parse()
        .map_err(|_| GameProfileError::InvalidProfileId(profile_id.clone()))?;

    let profile = GameProfileService::new(&state.store, &state.snowflake)
        .rename_profile(user.id, profile_id, &body.new_name)
        .await?;

    Ok((StatusCode::OK, Json(GameProfileDto::from(profile))))
}
