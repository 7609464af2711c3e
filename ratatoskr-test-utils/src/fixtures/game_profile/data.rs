//! Profile, quota and quota log database utilities.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::{
    error::TestError,
    fixtures::game_profile::{
        factory::{mock_profile_model, mock_quota_model},
        GameProfileFixtures,
    },
    model::{GameProfileModel, GameProfileQuotaLogModel, GameProfileQuotaModel},
};

impl<'a> GameProfileFixtures<'a> {
    /// Insert a quota row for `user_id`.
    pub async fn insert_quota(
        &self,
        user_id: i64,
        total: i32,
        used: i32,
    ) -> Result<GameProfileQuotaModel, TestError> {
        let quota = mock_quota_model(user_id, total, used);

        Ok(quota
            .into_active_model()
            .reset_all()
            .insert(&self.setup.db)
            .await?)
    }

    /// Insert a profile named `name` owned by `user_id`.
    pub async fn insert_profile(
        &self,
        user_id: i64,
        name: &str,
    ) -> Result<GameProfileModel, TestError> {
        let profile = mock_profile_model(user_id, name);

        Ok(profile
            .into_active_model()
            .reset_all()
            .insert(&self.setup.db)
            .await?)
    }

    /// Insert a raw quota log entry with the given idempotency key.
    pub async fn insert_ledger_entry(
        &self,
        user_id: i64,
        idempotency_key: &str,
        ref_profile_id: Option<i64>,
    ) -> Result<GameProfileQuotaLogModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::game_profile_quota_log::ActiveModel {
            id: ActiveValue::Set(super::factory::next_fixture_id()),
            user_id: ActiveValue::Set(user_id),
            op_type: ActiveValue::Set("ADD_PROFILE".to_string()),
            delta: ActiveValue::Set(1),
            before_used: ActiveValue::Set(0),
            after_used: ActiveValue::Set(1),
            before_total: ActiveValue::Set(1),
            after_total: ActiveValue::Set(1),
            idempotency_key: ActiveValue::Set(idempotency_key.to_string()),
            ref_profile_id: ActiveValue::Set(ref_profile_id),
            remark: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(&self.setup.db)
        .await?)
    }

    /// Current quota row for `user_id`, if any.
    pub async fn quota(&self, user_id: i64) -> Result<Option<GameProfileQuotaModel>, TestError> {
        Ok(entity::prelude::GameProfileQuota::find()
            .filter(entity::game_profile_quota::Column::UserId.eq(user_id))
            .one(&self.setup.db)
            .await?)
    }

    pub async fn profile(&self, profile_id: i64) -> Result<Option<GameProfileModel>, TestError> {
        Ok(entity::prelude::GameProfile::find_by_id(profile_id)
            .one(&self.setup.db)
            .await?)
    }

    pub async fn count_profiles(&self) -> Result<u64, TestError> {
        Ok(entity::prelude::GameProfile::find()
            .count(&self.setup.db)
            .await?)
    }

    pub async fn count_ledger_entries(&self) -> Result<u64, TestError> {
        Ok(entity::prelude::GameProfileQuotaLog::find()
            .count(&self.setup.db)
            .await?)
    }

    /// Every quota log entry for `user_id`, oldest first.
    pub async fn ledger_entries(
        &self,
        user_id: i64,
    ) -> Result<Vec<GameProfileQuotaLogModel>, TestError> {
        Ok(entity::prelude::GameProfileQuotaLog::find()
            .filter(entity::game_profile_quota_log::Column::UserId.eq(user_id))
            .order_by_asc(entity::game_profile_quota_log::Column::Id)
            .all(&self.setup.db)
            .await?)
    }
}
