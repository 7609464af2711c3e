//! HTTP controller endpoints for the ratatoskr API.
//!
//! Handlers resolve the caller through the [`util::auth_user::AuthUser`]
//! extractor, delegate to a service and render the result as JSON. Errors are
//! rendered by the `IntoResponse` implementation of [`crate::server::error::Error`].

pub mod game_profile;
pub mod user;
pub mod util;
