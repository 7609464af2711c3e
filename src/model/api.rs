use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// Identifier and timestamps shared by every entity response.
///
/// 64-bit ids are rendered as strings so JavaScript clients keep full precision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EntityMetaDto {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl EntityMetaDto {
    pub fn new(id: i64, created_at: NaiveDateTime, updated_at: NaiveDateTime) -> Self {
        Self {
            id: id.to_string(),
            created_at,
            updated_at,
        }
    }
}
