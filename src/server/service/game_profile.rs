//! Game profile allocation and rename.
//!
//! Allocation runs as one transaction holding an exclusive lock on the user's
//! quota row from the capacity check until commit, so allocations for the same
//! user are serialized while different users proceed in parallel. Rename runs
//! outside any transaction; the unique index on `game_profile.name` is the final
//! arbiter when two renames race.

use std::str::FromStr;

use sea_orm::{DbErr, SqlErr, TransactionTrait};
use uuid::Uuid;

use crate::server::{
    data::{
        game_profile::GameProfileRepository,
        game_profile_quota::GameProfileQuotaRepository,
        game_profile_quota_log::{idempotency_key, GameProfileQuotaLogRepository, NewLedgerEntry},
    },
    error::{game_profile::GameProfileError, Error},
    model::{app::Store, db::GameProfileModel, quota_operation::QuotaOperation},
    util::snowflake::SnowflakeGenerator,
};

const NAME_LEN: std::ops::RangeInclusive<usize> = 3..=16;
const IDEMPOTENCY_KEY_LEN: std::ops::RangeInclusive<usize> = 1..=64;

/// Trimmed profile name, or `InvalidName` if it is not 3-16 characters of `[A-Za-z0-9_]`.
pub fn validate_profile_name(name: &str) -> Result<String, GameProfileError> {
    let name = name.trim();

    let valid_len = NAME_LEN.contains(&name.len());
    let valid_chars = name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid_len && valid_chars {
        Ok(name.to_string())
    } else {
        Err(GameProfileError::InvalidName(name.to_string()))
    }
}

/// Check a caller-supplied idempotency key is 1-64 characters of `[A-Za-z0-9_-]`.
pub fn validate_idempotency_key(key: &str) -> Result<(), GameProfileError> {
    let valid_len = IDEMPOTENCY_KEY_LEN.contains(&key.len());
    let valid_chars = key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid_len && valid_chars {
        Ok(())
    } else {
        Err(GameProfileError::InvalidIdempotencyKey)
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

pub struct GameProfileService<'a> {
    store: &'a Store,
    snowflake: &'a SnowflakeGenerator,
}

impl<'a> GameProfileService<'a> {
    /// Creates a new instance of [`GameProfileService`]
    pub fn new(store: &'a Store, snowflake: &'a SnowflakeGenerator) -> Self {
        Self { store, snowflake }
    }

    /// Allocate one profile slot from the user's quota.
    ///
    /// The quota row is created with the default capacity on first use. When
    /// `nonce` is given and a ledger entry already exists for it, the profile that
    /// entry references is returned and nothing is written.
    ///
    /// # Arguments
    /// - `user_id` - Owner of the new profile, must be non-zero
    /// - `name` - Requested profile name, trimmed before validation
    /// - `nonce` - Optional caller-supplied idempotency key
    ///
    /// # Returns
    /// - `Ok(GameProfileModel)` - The new profile, or the replayed one
    /// - `Err(GameProfileError::InvalidUserId | InvalidName | InvalidIdempotencyKey)` - Rejected before any write
    /// - `Err(GameProfileError::QuotaExhausted)` - `used >= total`
    /// - `Err(GameProfileError::NameTaken | UuidTaken)` - Uniqueness conflict
    /// - `Err(GameProfileError::IdempotencyKeyReused)` - Nonce belongs to an entry without a live profile
    /// - `Err(Error::DbErr)` - Storage failure; the transaction is rolled back
    pub async fn allocate_profile(
        &self,
        user_id: i64,
        name: &str,
        nonce: Option<&str>,
    ) -> Result<GameProfileModel, Error> {
        if user_id == 0 {
            return Err(GameProfileError::InvalidUserId.into());
        }
        let name = validate_profile_name(name)?;
        if let Some(nonce) = nonce {
            validate_idempotency_key(nonce)?;
        }

        tracing::info!(user_id, name = %name, "Allocating game profile");

        let op = QuotaOperation::AddProfile;
        let txn = self.store.db.begin().await?;

        let quota_repo = GameProfileQuotaRepository::new(&txn, self.snowflake);
        let profile_repo = GameProfileRepository::new(&txn, self.snowflake);
        let log_repo = GameProfileQuotaLogRepository::new(&txn, self.snowflake);

        let quota = quota_repo
            .get_or_create(user_id, true)
            .await?
            .ok_or(GameProfileError::QuotaNotFound(user_id))?;

        if let Some(nonce) = nonce {
            let key = idempotency_key(op, user_id, Some(nonce), None);

            if let Some(entry) = log_repo.get_by_idempotency_key(&key).await? {
                let stored_op = QuotaOperation::from_str(&entry.op_type)?;

                let replayed = match entry.ref_profile_id {
                    Some(profile_id) if stored_op == op => {
                        profile_repo
                            .get_by_id_and_owner(profile_id, user_id)
                            .await?
                    }
                    _ => None,
                };

                let Some(profile) = replayed else {
                    return Err(GameProfileError::IdempotencyKeyReused(nonce.to_string()).into());
                };

                txn.commit().await?;
                tracing::info!(user_id, profile_id = profile.id, "Replayed game profile allocation");

                return Ok(profile);
            }
        }

        if quota.used >= quota.total {
            return Err(GameProfileError::QuotaExhausted {
                used: quota.used,
                total: quota.total,
            }
            .into());
        }

        let uuid = Uuid::now_v7().to_string();
        if profile_repo.exists_by_uuid(&uuid).await? {
            return Err(GameProfileError::UuidTaken(uuid).into());
        }
        if profile_repo.exists_by_name_except(&name, None).await? {
            return Err(GameProfileError::NameTaken(name).into());
        }

        let profile = match profile_repo.create(user_id, &uuid, &name).await {
            Ok(profile) => profile,
            Err(e) if is_unique_violation(&e) => {
                return Err(GameProfileError::NameTaken(name).into());
            }
            Err(e) => return Err(e.into()),
        };

        let new_used = op.apply(quota.used, 1)?;
        quota_repo.debit(quota.id, new_used).await?;

        log_repo
            .append(NewLedgerEntry {
                user_id,
                op,
                delta: 1,
                before_used: quota.used,
                before_total: quota.total,
                ref_profile_id: Some(profile.id),
                remark: None,
                nonce,
            })
            .await?;

        txn.commit().await?;

        tracing::info!(
            user_id,
            profile_id = profile.id,
            used = new_used,
            total = quota.total,
            "Allocated game profile"
        );

        Ok(profile)
    }

    /// Rename a profile owned by `user_id`.
    ///
    /// Renaming to the current name returns the profile without writing.
    ///
    /// # Returns
    /// - `Ok(GameProfileModel)` - The profile as stored after the rename
    /// - `Err(GameProfileError::ProfileNotFound)` - Missing or owned by someone else
    /// - `Err(GameProfileError::InvalidName)` - Name fails validation
    /// - `Err(GameProfileError::NameTaken)` - Another profile holds the name
    /// - `Err(Error::DbErr)` - Storage failure
    pub async fn rename_profile(
        &self,
        user_id: i64,
        profile_id: i64,
        new_name: &str,
    ) -> Result<GameProfileModel, Error> {
        let profile_repo = GameProfileRepository::new(&self.store.db, self.snowflake);

        let profile = profile_repo
            .get_by_id_and_owner(profile_id, user_id)
            .await?
            .ok_or(GameProfileError::ProfileNotFound(profile_id))?;

        let name = validate_profile_name(new_name)?;
        if name == profile.name {
            return Ok(profile);
        }

        tracing::info!(user_id, profile_id, name = %name, "Renaming game profile");

        if profile_repo
            .exists_by_name_except(&name, Some(profile_id))
            .await?
        {
            return Err(GameProfileError::NameTaken(name).into());
        }

        match profile_repo.update_name(profile_id, &name).await {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(GameProfileError::NameTaken(name).into());
            }
            Err(e) => return Err(e.into()),
        }

        profile_repo
            .get_by_id(profile_id)
            .await?
            .ok_or_else(|| GameProfileError::ProfileNotFound(profile_id).into())
    }
}
