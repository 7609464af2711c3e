//! Append-only audit log of quota mutations.
//!
//! Entries are never updated or deleted. Each carries before/after snapshots of
//! the quota and an idempotency key derived from the logical operation, so a
//! repeated append of the same operation returns the original entry.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::{
    error::Error,
    model::{db::GameProfileQuotaLogModel, quota_operation::QuotaOperation},
    util::snowflake::{Gene, SnowflakeGenerator},
};

/// One quota mutation to record.
pub struct NewLedgerEntry<'a> {
    pub user_id: i64,
    pub op: QuotaOperation,
    /// Non-negative; the sign comes from the operation's polarity
    pub delta: i32,
    pub before_used: i32,
    pub before_total: i32,
    pub ref_profile_id: Option<i64>,
    pub remark: Option<&'a str>,
    /// Caller-supplied nonce identifying the logical request, if any
    pub nonce: Option<&'a str>,
}

impl NewLedgerEntry<'_> {
    pub fn idempotency_key(&self) -> String {
        idempotency_key(self.op, self.user_id, self.nonce, self.ref_profile_id)
    }
}

/// Key identifying one logical quota operation.
///
/// `<OP>:<user_id>:n:<nonce>` when the caller supplied a nonce, otherwise
/// `<OP>:<user_id>:<ref_profile_id or 0>`. The `n:` marker keeps a numeric
/// nonce from colliding with a profile id. Never time-based, so retries of the
/// same operation map to the same key.
pub fn idempotency_key(
    op: QuotaOperation,
    user_id: i64,
    nonce: Option<&str>,
    ref_profile_id: Option<i64>,
) -> String {
    match nonce {
        Some(nonce) => format!("{}:{}:n:{}", op, user_id, nonce),
        None => format!("{}:{}:{}", op, user_id, ref_profile_id.unwrap_or(0)),
    }
}

pub struct GameProfileQuotaLogRepository<'a, C: ConnectionTrait> {
    db: &'a C,
    snowflake: &'a SnowflakeGenerator,
}

impl<'a, C: ConnectionTrait> GameProfileQuotaLogRepository<'a, C> {
    /// Creates a new instance of [`GameProfileQuotaLogRepository`]
    pub fn new(db: &'a C, snowflake: &'a SnowflakeGenerator) -> Self {
        Self { db, snowflake }
    }

    /// Record a quota mutation
    ///
    /// `after_used` is computed from `before_used`, `delta` and the operation's
    /// polarity. Totals are not changed by any current operation, so
    /// `after_total = before_total`.
    ///
    /// # Returns
    /// - `Ok(GameProfileQuotaLogModel)` - The new entry, or the existing one for a repeated key
    /// - `Err(Error::LedgerError)` - Negative delta or a negative resulting balance
    /// - `Err(Error::DbErr)` - Database query or insert failed
    pub async fn append(
        &self,
        entry: NewLedgerEntry<'_>,
    ) -> Result<GameProfileQuotaLogModel, Error> {
        let after_used = entry.op.apply(entry.before_used, entry.delta)?;
        let idempotency_key = entry.idempotency_key();

        if let Some(existing) = self.get_by_idempotency_key(&idempotency_key).await? {
            return Ok(existing);
        }

        let now = Utc::now().naive_utc();
        let remark = entry.remark.unwrap_or(entry.op.default_remark());

        let log = entity::game_profile_quota_log::ActiveModel {
            id: ActiveValue::Set(self.snowflake.generate(Gene::GameProfileQuotaLog)),
            user_id: ActiveValue::Set(entry.user_id),
            op_type: ActiveValue::Set(entry.op.as_str().to_string()),
            delta: ActiveValue::Set(entry.delta),
            before_used: ActiveValue::Set(entry.before_used),
            after_used: ActiveValue::Set(after_used),
            before_total: ActiveValue::Set(entry.before_total),
            after_total: ActiveValue::Set(entry.before_total),
            idempotency_key: ActiveValue::Set(idempotency_key),
            ref_profile_id: ActiveValue::Set(entry.ref_profile_id),
            remark: ActiveValue::Set(Some(remark.to_string())),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        Ok(log.insert(self.db).await?)
    }

    pub async fn get_by_id(&self, log_id: i64) -> Result<Option<GameProfileQuotaLogModel>, Error> {
        Ok(entity::prelude::GameProfileQuotaLog::find_by_id(log_id)
            .one(self.db)
            .await?)
    }

    pub async fn get_by_idempotency_key(
        &self,
        idempotency_key: &str,
    ) -> Result<Option<GameProfileQuotaLogModel>, Error> {
        Ok(entity::prelude::GameProfileQuotaLog::find()
            .filter(entity::game_profile_quota_log::Column::IdempotencyKey.eq(idempotency_key))
            .one(self.db)
            .await?)
    }

    /// Entries for `user_id`, newest first
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<GameProfileQuotaLogModel>, Error> {
        Ok(entity::prelude::GameProfileQuotaLog::find()
            .filter(entity::game_profile_quota_log::Column::UserId.eq(user_id))
            .order_by_desc(entity::game_profile_quota_log::Column::Id)
            .all(self.db)
            .await?)
    }
}
