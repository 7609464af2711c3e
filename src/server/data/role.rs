use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, ConnectionTrait, DbErr, EntityTrait, QueryOrder};

use crate::server::model::db::RoleModel;

pub struct RoleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RoleRepository<'a, C> {
    /// Creates a new instance of [`RoleRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Insert the role or refresh its display name and description
    pub async fn upsert(
        &self,
        name: &str,
        display_name: &str,
        description: &str,
    ) -> Result<RoleModel, DbErr> {
        let role = entity::role::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            display_name: ActiveValue::Set(display_name.to_string()),
            description: ActiveValue::Set(description.to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
        };

        entity::prelude::Role::insert(role)
            .on_conflict(
                OnConflict::column(entity::role::Column::Name)
                    .update_columns([
                        entity::role::Column::DisplayName,
                        entity::role::Column::Description,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }

    pub async fn get(&self, name: &str) -> Result<Option<RoleModel>, DbErr> {
        entity::prelude::Role::find_by_id(name.to_string())
            .one(self.db)
            .await
    }

    pub async fn all(&self) -> Result<Vec<RoleModel>, DbErr> {
        entity::prelude::Role::find()
            .order_by_asc(entity::role::Column::Name)
            .all(self.db)
            .await
    }
}
