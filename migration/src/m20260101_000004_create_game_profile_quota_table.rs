use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260101_000002_create_user_table::User;

static FK_GAME_PROFILE_QUOTA_USER_ID: &str = "fk_game_profile_quota_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameProfileQuota::Table)
                    .if_not_exists()
                    .col(big_integer(GameProfileQuota::Id).primary_key())
                    .col(big_integer_uniq(GameProfileQuota::UserId))
                    .col(integer(GameProfileQuota::Total).default(0))
                    .col(integer(GameProfileQuota::Used).default(0))
                    .col(timestamp(GameProfileQuota::CreatedAt))
                    .col(timestamp(GameProfileQuota::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_GAME_PROFILE_QUOTA_USER_ID)
                    .from_tbl(GameProfileQuota::Table)
                    .from_col(GameProfileQuota::UserId)
                    .to_tbl(User::Table)
                    .to_col(User::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_GAME_PROFILE_QUOTA_USER_ID)
                    .table(GameProfileQuota::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(GameProfileQuota::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum GameProfileQuota {
    Table,
    Id,
    UserId,
    Total,
    Used,
    CreatedAt,
    UpdatedAt,
}
