use sea_orm::DbErr;

use super::Error;

/// Strategy for handling errors in a retry context
pub enum ErrorRetryStrategy {
    /// Retry with exponential backoff (transient infrastructure errors)
    Retry,
    /// Failed permanently (bad request, constraint violation, bug)
    Fail,
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            Self::DbErr(db_err) => match db_err {
                // Connection acquisition and connection errors are transient
                DbErr::ConnectionAcquire(_) => ErrorRetryStrategy::Retry,
                DbErr::Conn(_) => ErrorRetryStrategy::Retry,

                // Query errors, constraint violations, type conversions, missing records
                // won't resolve with a retry
                _ => ErrorRetryStrategy::Fail,
            },

            // Identity provider unreachable or failing on its side
            Self::ReqwestError(reqwest_error) => match reqwest_error.status() {
                Some(status) if status.is_server_error() => ErrorRetryStrategy::Retry,
                Some(_) => ErrorRetryStrategy::Fail,
                None => ErrorRetryStrategy::Retry,
            },

            // Cache connection issues are transient
            Self::RedisError(_) => ErrorRetryStrategy::Retry,

            Self::ConfigError(_)
            | Self::AuthError(_)
            | Self::GameProfileError(_)
            | Self::LedgerError(_)
            | Self::ParseError(_)
            | Self::InternalError(_) => ErrorRetryStrategy::Fail,
        }
    }
}
