use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260101_000001_create_role_table::Role;

static IDX_USER_EMAIL: &str = "idx_user_email";
static IDX_USER_PHONE: &str = "idx_user_phone";
static FK_USER_ROLE_NAME: &str = "fk_user_role_name";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(big_integer(User::Id).primary_key())
                    .col(string_len(User::Username, 255))
                    .col(string_len_null(User::Email, 255))
                    .col(string_len_null(User::Phone, 32))
                    .col(string_len_null(User::RoleName, 32))
                    .col(boolean(User::HasBan).default(false))
                    .col(timestamp_null(User::JailedAt))
                    .col(timestamp(User::CreatedAt))
                    .col(timestamp(User::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_USER_EMAIL)
                    .table(User::Table)
                    .col(User::Email)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_USER_PHONE)
                    .table(User::Table)
                    .col(User::Phone)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_USER_ROLE_NAME)
                    .from_tbl(User::Table)
                    .from_col(User::RoleName)
                    .to_tbl(Role::Table)
                    .to_col(Role::Name)
                    .on_delete(ForeignKeyAction::Restrict)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_USER_ROLE_NAME)
                    .table(User::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_USER_PHONE)
                    .table(User::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_USER_EMAIL)
                    .table(User::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    Username,
    Email,
    Phone,
    RoleName,
    HasBan,
    JailedAt,
    CreatedAt,
    UpdatedAt,
}
