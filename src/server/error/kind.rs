use axum::http::StatusCode;
use sea_orm::DbErr;

use super::Error;

/// Classification of every error the service can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Client-correctable input, e.g. a malformed profile name
    InvalidArgument,
    /// Missing or rejected identity
    Unauthenticated,
    /// Quota or profile missing, or owned by someone else
    NotFound,
    /// Duplicate profile name or identifier
    Conflict,
    /// Quota full
    ResourceExhausted,
    /// Underlying database failure
    Storage,
    Internal,
}

impl ErrorKind {
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::InvalidArgument => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::ResourceExhausted => StatusCode::SERVICE_UNAVAILABLE,
            Self::Storage | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AuthError(err) => err.kind(),
            Self::GameProfileError(err) => err.kind(),
            Self::LedgerError(err) => err.kind(),
            Self::ParseError(_) => ErrorKind::InvalidArgument,
            Self::DbErr(DbErr::RecordNotFound(_)) => ErrorKind::NotFound,
            Self::DbErr(_) => ErrorKind::Storage,
            Self::ConfigError(_)
            | Self::InternalError(_)
            | Self::RedisError(_)
            | Self::ReqwestError(_) => ErrorKind::Internal,
        }
    }
}
