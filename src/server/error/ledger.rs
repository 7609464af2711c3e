use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::error::{kind::ErrorKind, respond};

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Unknown quota operation {0:?}")]
    UnknownOperation(String),
    #[error("Quota delta must be non-negative, got {0}")]
    NegativeDelta(i32),
    #[error("Quota operation {op} would leave used at {after_used}")]
    NegativeBalance { op: &'static str, after_used: i32 },
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        respond(self.kind(), self)
    }
}
