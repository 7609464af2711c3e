//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every endpoint is registered with its utoipa path definition; Swagger UI is
//! served at `/api/docs` with the document at `/api/docs/openapi.json`.

use std::time::Duration;

use axum::{error_handling::HandleErrorLayer, http::StatusCode, BoxError, Router};
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

/// Builds the application's HTTP router with all API endpoints and Swagger UI.
///
/// # Registered Endpoints
/// - `POST /api/v1/game-profile` - Allocate a game profile
/// - `PATCH /api/v1/game-profile/{profile_id}/username` - Rename a game profile
/// - `GET /api/v1/user/info` - Get the current user
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Ratatoskr", description = "Game profile allocation API"),
        modifiers(&BearerAuth),
        tags(
            (name = controller::game_profile::GAME_PROFILE_TAG, description = "Game profile routes"),
            (name = controller::user::USER_TAG, description = "User routes"),
        )
    )]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::game_profile::add_game_profile))
        .routes(routes!(controller::game_profile::change_username))
        .routes(routes!(controller::user::get_user_info))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}

/// Abort handlers that run longer than `timeout` with 408 Request Timeout
///
/// Dropping a timed-out handler drops any open transaction, which rolls back.
pub fn with_timeout(router: Router<AppState>, timeout: Duration) -> Router<AppState> {
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(|err: BoxError| async move {
                if err.is::<tower::timeout::error::Elapsed>() {
                    (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string())
                } else {
                    tracing::error!("Unhandled middleware error: {}", err);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            }))
            .layer(TimeoutLayer::new(timeout)),
    )
}
