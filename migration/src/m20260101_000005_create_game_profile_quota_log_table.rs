use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260101_000002_create_user_table::User,
    m20260101_000003_create_game_profile_table::GameProfile,
};

static IDX_QUOTA_LOG_USER_ID: &str = "idx_game_profile_quota_log_user_id";
static IDX_QUOTA_LOG_OP_TYPE: &str = "idx_game_profile_quota_log_op_type";
static IDX_QUOTA_LOG_REF_PROFILE_ID: &str = "idx_game_profile_quota_log_ref_profile_id";
static FK_QUOTA_LOG_USER_ID: &str = "fk_game_profile_quota_log_user_id";
static FK_QUOTA_LOG_REF_PROFILE_ID: &str = "fk_game_profile_quota_log_ref_profile_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameProfileQuotaLog::Table)
                    .if_not_exists()
                    .col(big_integer(GameProfileQuotaLog::Id).primary_key())
                    .col(big_integer(GameProfileQuotaLog::UserId))
                    .col(string_len(GameProfileQuotaLog::OpType, 32))
                    .col(integer(GameProfileQuotaLog::Delta))
                    .col(integer(GameProfileQuotaLog::BeforeUsed))
                    .col(integer(GameProfileQuotaLog::AfterUsed))
                    .col(integer(GameProfileQuotaLog::BeforeTotal))
                    .col(integer(GameProfileQuotaLog::AfterTotal))
                    .col(string_len_uniq(GameProfileQuotaLog::IdempotencyKey, 255))
                    .col(big_integer_null(GameProfileQuotaLog::RefProfileId))
                    .col(string_len_null(GameProfileQuotaLog::Remark, 255))
                    .col(timestamp(GameProfileQuotaLog::CreatedAt))
                    .col(timestamp(GameProfileQuotaLog::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        for (name, col) in [
            (IDX_QUOTA_LOG_USER_ID, GameProfileQuotaLog::UserId),
            (IDX_QUOTA_LOG_OP_TYPE, GameProfileQuotaLog::OpType),
            (IDX_QUOTA_LOG_REF_PROFILE_ID, GameProfileQuotaLog::RefProfileId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(GameProfileQuotaLog::Table)
                        .col(col)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_QUOTA_LOG_USER_ID)
                    .from_tbl(GameProfileQuotaLog::Table)
                    .from_col(GameProfileQuotaLog::UserId)
                    .to_tbl(User::Table)
                    .to_col(User::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_QUOTA_LOG_REF_PROFILE_ID)
                    .from_tbl(GameProfileQuotaLog::Table)
                    .from_col(GameProfileQuotaLog::RefProfileId)
                    .to_tbl(GameProfile::Table)
                    .to_col(GameProfile::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [FK_QUOTA_LOG_REF_PROFILE_ID, FK_QUOTA_LOG_USER_ID] {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name(name)
                        .table(GameProfileQuotaLog::Table)
                        .to_owned(),
                )
                .await?;
        }

        for name in [
            IDX_QUOTA_LOG_REF_PROFILE_ID,
            IDX_QUOTA_LOG_OP_TYPE,
            IDX_QUOTA_LOG_USER_ID,
        ] {
            manager
                .drop_index(
                    Index::drop()
                        .name(name)
                        .table(GameProfileQuotaLog::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_table(Table::drop().table(GameProfileQuotaLog::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum GameProfileQuotaLog {
    Table,
    Id,
    UserId,
    OpType,
    Delta,
    BeforeUsed,
    AfterUsed,
    BeforeTotal,
    AfterTotal,
    IdempotencyKey,
    RefProfileId,
    Remark,
    CreatedAt,
    UpdatedAt,
}
