use serde::{Deserialize, Serialize};

use crate::model::api::EntityMetaDto;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GameProfileDto {
    #[serde(flatten)]
    pub meta: EntityMetaDto,
    pub user_id: String,
    /// Version 7 UUID, unique across all profiles
    pub uuid: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_library_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cape_library_id: Option<String>,
}

impl From<entity::game_profile::Model> for GameProfileDto {
    fn from(profile: entity::game_profile::Model) -> Self {
        Self {
            meta: EntityMetaDto::new(profile.id, profile.created_at, profile.updated_at),
            user_id: profile.user_id.to_string(),
            uuid: profile.uuid,
            name: profile.name,
            skin_library_id: profile.skin_library_id.map(|id| id.to_string()),
            cape_library_id: profile.cape_library_id.map(|id| id.to_string()),
        }
    }
}

/// Body of `POST /api/v1/game-profile`
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AddGameProfileDto {
    pub name: String,
}

/// Body of `PATCH /api/v1/game-profile/{profile_id}/username`
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ChangeUsernameDto {
    pub new_name: String,
}
