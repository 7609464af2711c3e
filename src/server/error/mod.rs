//! Error types for the ratatoskr server.
//!
//! Domain errors (authentication, configuration, game profiles, quota ledger)
//! are aggregated into [`Error`]. Every error maps onto one [`kind::ErrorKind`],
//! which decides the HTTP status and how loudly the failure is logged.

pub mod auth;
pub mod config;
pub mod game_profile;
pub mod kind;
pub mod ledger;
pub mod retry;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, game_profile::GameProfileError, kind::ErrorKind,
        ledger::LedgerError,
    },
};

/// Main error type for the ratatoskr server.
///
/// `#[from]` conversions let the `?` operator lift domain and library errors into
/// this type. The `IntoResponse` implementation maps each variant to the status
/// code of its [`ErrorKind`].
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (missing credentials, rejected token, unknown user).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Game profile error (invalid name, exhausted quota, name conflict).
    #[error(transparent)]
    GameProfileError(#[from] GameProfileError),
    /// Quota ledger error (unknown operation, invariant violation).
    #[error(transparent)]
    LedgerError(#[from] LedgerError),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug in ratatoskr's code.
    #[error("Internal error, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Valkey/Redis error (connection, command execution, response parsing).
    #[error(transparent)]
    RedisError(#[from] fred::error::Error),
    /// HTTP client error talking to the identity provider.
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::GameProfileError(err) => err.into_response(),
            Self::LedgerError(err) => err.into_response(),
            err => respond(err.kind(), err),
        }
    }
}

/// Wrapper converting any displayable error into a 500 Internal Server Error.
///
/// Logs the full error and returns a generic message so implementation details
/// never reach the client.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}

/// Wrapper converting a client-correctable error into a 4xx/503 response.
///
/// The error's own message is returned to the client; it is logged at `debug`.
pub struct ClientError<E>(pub ErrorKind, pub E);

impl<E: std::fmt::Display> IntoResponse for ClientError<E> {
    fn into_response(self) -> Response {
        let ClientError(kind, err) = self;
        tracing::debug!(kind = ?kind, "{}", err);

        (
            kind.status_code(),
            Json(ErrorDto {
                error: err.to_string(),
            }),
        )
            .into_response()
    }
}

/// Render a domain error according to its kind.
pub(crate) fn respond<E: std::fmt::Display>(kind: ErrorKind, err: E) -> Response {
    match kind {
        ErrorKind::Storage | ErrorKind::Internal => InternalServerError(err).into_response(),
        kind => ClientError(kind, err).into_response(),
    }
}
