use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::error::{kind::ErrorKind, respond};

#[derive(Error, Debug)]
pub enum GameProfileError {
    #[error("User ID must be non-zero")]
    InvalidUserId,
    #[error("Invalid game profile name: {0}")]
    InvalidName(String),
    #[error("Invalid game profile ID: {0:?}")]
    InvalidProfileId(String),
    #[error("Invalid idempotency key, expected 1-64 characters of A-Z, a-z, 0-9, '_' or '-'")]
    InvalidIdempotencyKey,
    #[error("Game profile quota exhausted ({used}/{total} in use)")]
    QuotaExhausted { used: i32, total: i32 },
    #[error("Game profile quota for user ID {0} not found")]
    QuotaNotFound(i64),
    #[error("Game profile {0} not found")]
    ProfileNotFound(i64),
    #[error("Game profile name {0:?} is already taken")]
    NameTaken(String),
    #[error("Game profile UUID {0} already exists")]
    UuidTaken(String),
    #[error("Idempotency key {0:?} was already used for a different request")]
    IdempotencyKeyReused(String),
}

impl GameProfileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUserId
            | Self::InvalidName(_)
            | Self::InvalidProfileId(_)
            | Self::InvalidIdempotencyKey => ErrorKind::InvalidArgument,
            Self::QuotaExhausted { .. } => ErrorKind::ResourceExhausted,
            Self::QuotaNotFound(_) | Self::ProfileNotFound(_) => ErrorKind::NotFound,
            Self::NameTaken(_) | Self::UuidTaken(_) | Self::IdempotencyKeyReused(_) => {
                ErrorKind::Conflict
            }
        }
    }
}

impl IntoResponse for GameProfileError {
    fn into_response(self) -> Response {
        respond(self.kind(), self)
    }
}
