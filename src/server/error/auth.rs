use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::error::{kind::ErrorKind, respond};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing or malformed bearer token in Authorization header")]
    MissingBearerToken,
    #[error("Identity provider rejected the access token with status {0}")]
    TokenRejected(u16),
    #[error("Identity provider returned a subject that is not a valid user ID: {0:?}")]
    InvalidSubject(String),
    #[error("Invalid role name {0:?}, expected 2-32 characters of A-Z or underscore")]
    InvalidRoleName(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingBearerToken | Self::TokenRejected(_) => ErrorKind::Unauthenticated,
            Self::InvalidSubject(_) | Self::InvalidRoleName(_) => ErrorKind::InvalidArgument,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        respond(self.kind(), self)
    }
}
