use chrono::Utc;
use migration::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter,
};

use crate::server::{
    model::db::GameProfileModel,
    util::snowflake::{Gene, SnowflakeGenerator},
};

pub struct GameProfileRepository<'a, C: ConnectionTrait> {
    db: &'a C,
    snowflake: &'a SnowflakeGenerator,
}

impl<'a, C: ConnectionTrait> GameProfileRepository<'a, C> {
    /// Creates a new instance of [`GameProfileRepository`]
    pub fn new(db: &'a C, snowflake: &'a SnowflakeGenerator) -> Self {
        Self { db, snowflake }
    }

    /// Insert a profile with a freshly generated primary key
    ///
    /// # Returns
    /// - `Ok(GameProfileModel)` - The inserted profile
    /// - `Err(DbErr)` - Insert failed, including unique violations on `uuid` or `name`
    pub async fn create(
        &self,
        user_id: i64,
        uuid: &str,
        name: &str,
    ) -> Result<GameProfileModel, DbErr> {
        let now = Utc::now().naive_utc();

        let profile = entity::game_profile::ActiveModel {
            id: ActiveValue::Set(self.snowflake.generate(Gene::GameProfile)),
            user_id: ActiveValue::Set(user_id),
            uuid: ActiveValue::Set(uuid.to_string()),
            name: ActiveValue::Set(name.to_string()),
            skin_library_id: ActiveValue::Set(None),
            cape_library_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        profile.insert(self.db).await
    }

    pub async fn exists_by_uuid(&self, uuid: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::GameProfile::find()
            .filter(entity::game_profile::Column::Uuid.eq(uuid))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Whether any profile other than `exclude_profile_id` already uses `name`
    pub async fn exists_by_name_except(
        &self,
        name: &str,
        exclude_profile_id: Option<i64>,
    ) -> Result<bool, DbErr> {
        let mut query = entity::prelude::GameProfile::find()
            .filter(entity::game_profile::Column::Name.eq(name));

        if let Some(profile_id) = exclude_profile_id {
            query = query.filter(entity::game_profile::Column::Id.ne(profile_id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    pub async fn get_by_id(&self, profile_id: i64) -> Result<Option<GameProfileModel>, DbErr> {
        entity::prelude::GameProfile::find_by_id(profile_id)
            .one(self.db)
            .await
    }

    /// Profile `profile_id`, only if it belongs to `user_id`
    pub async fn get_by_id_and_owner(
        &self,
        profile_id: i64,
        user_id: i64,
    ) -> Result<Option<GameProfileModel>, DbErr> {
        entity::prelude::GameProfile::find_by_id(profile_id)
            .filter(entity::game_profile::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    /// Overwrite the profile name
    ///
    /// Returns the number of rows affected, 0 when the profile does not exist.
    pub async fn update_name(&self, profile_id: i64, name: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::GameProfile::update_many()
            .col_expr(entity::game_profile::Column::Name, Expr::value(name))
            .col_expr(
                entity::game_profile::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::game_profile::Column::Id.eq(profile_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
