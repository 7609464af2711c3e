use axum::{http::StatusCode, response::IntoResponse};

use crate::{
    model::{api::ErrorDto, user::UserDto},
    server::{controller::util::auth_user::AuthUser, error::Error},
};

pub static USER_TAG: &str = "user";

/// Get the user behind the bearer token
///
/// The user is created on first sign-in with the `PLAYER` role.
#[utoipa::path(
    get,
    path = "/api/v1/user/info",
    tag = USER_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Success when retrieving the current user", body = UserDto),
        (status = 400, description = "Identity provider returned a non-numeric subject", body = ErrorDto),
        (status = 401, description = "Missing or rejected bearer token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_info(AuthUser(user): AuthUser) -> Result<impl IntoResponse, Error> {
    Ok((StatusCode::OK, axum::Json(UserDto::from(user))))
}
