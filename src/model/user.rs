use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::api::EntityMetaDto;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserDto {
    #[serde(flatten)]
    pub meta: EntityMetaDto,
    pub username: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role_name: Option<String>,
    pub has_ban: bool,
    pub jailed_at: Option<NaiveDateTime>,
}

impl From<entity::user::Model> for UserDto {
    fn from(user: entity::user::Model) -> Self {
        Self {
            meta: EntityMetaDto::new(user.id, user.created_at, user.updated_at),
            username: user.username,
            email: user.email,
            phone: user.phone,
            role_name: user.role_name,
            has_ban: user.has_ban,
            jailed_at: user.jailed_at,
        }
    }
}
