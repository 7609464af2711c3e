use chrono::Utc;
use migration::{Expr, OnConflict};
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect,
};

use crate::server::{
    model::db::GameProfileQuotaModel,
    util::snowflake::{Gene, SnowflakeGenerator},
};

pub struct GameProfileQuotaRepository<'a, C: ConnectionTrait> {
    db: &'a C,
    snowflake: &'a SnowflakeGenerator,
}

impl<'a, C: ConnectionTrait> GameProfileQuotaRepository<'a, C> {
    pub const DEFAULT_TOTAL: i32 = 1;

    /// Creates a new instance of [`GameProfileQuotaRepository`]
    pub fn new(db: &'a C, snowflake: &'a SnowflakeGenerator) -> Self {
        Self { db, snowflake }
    }

    async fn find(
        &self,
        user_id: i64,
        for_update: bool,
    ) -> Result<Option<GameProfileQuotaModel>, DbErr> {
        let query = entity::prelude::GameProfileQuota::find()
            .filter(entity::game_profile_quota::Column::UserId.eq(user_id));

        if for_update {
            query.lock_exclusive().one(self.db).await
        } else {
            query.one(self.db).await
        }
    }

    /// Quota row for `user_id`, created with `total = 1, used = 0` if absent
    ///
    /// With `for_update`, the row is read with an exclusive lock held until the
    /// enclosing transaction ends. A row inserted concurrently by another caller
    /// is picked up instead of failing on the unique `user_id` key.
    ///
    /// # Returns
    /// - `Ok(Some(GameProfileQuotaModel))` - Existing or newly created quota
    /// - `Ok(None)` - Row could not be read back after the insert
    /// - `Err(DbErr)` - Database query or insert failed
    pub async fn get_or_create(
        &self,
        user_id: i64,
        for_update: bool,
    ) -> Result<Option<GameProfileQuotaModel>, DbErr> {
        if let Some(quota) = self.find(user_id, for_update).await? {
            return Ok(Some(quota));
        }

        let now = Utc::now().naive_utc();
        let quota = entity::game_profile_quota::ActiveModel {
            id: ActiveValue::Set(self.snowflake.generate(Gene::GameProfileQuota)),
            user_id: ActiveValue::Set(user_id),
            total: ActiveValue::Set(Self::DEFAULT_TOTAL),
            used: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        entity::prelude::GameProfileQuota::insert(quota)
            .on_conflict(
                OnConflict::column(entity::game_profile_quota::Column::UserId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        self.find(user_id, for_update).await
    }

    /// Overwrite `used` on the quota row
    ///
    /// Callers validate `new_used` against `total` while holding the row lock.
    pub async fn debit(&self, quota_id: i64, new_used: i32) -> Result<(), DbErr> {
        entity::prelude::GameProfileQuota::update_many()
            .col_expr(entity::game_profile_quota::Column::Used, Expr::value(new_used))
            .col_expr(
                entity::game_profile_quota::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::game_profile_quota::Column::Id.eq(quota_id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
