use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260101_000002_create_user_table::User;

static IDX_GAME_PROFILE_USER_ID: &str = "idx_game_profile_user_id";
static IDX_GAME_PROFILE_SKIN_LIBRARY_ID: &str = "idx_game_profile_skin_library_id";
static IDX_GAME_PROFILE_CAPE_LIBRARY_ID: &str = "idx_game_profile_cape_library_id";
static UK_GAME_PROFILE_NAME: &str = "uk_game_profile_name";
static FK_GAME_PROFILE_USER_ID: &str = "fk_game_profile_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameProfile::Table)
                    .if_not_exists()
                    .col(big_integer(GameProfile::Id).primary_key())
                    .col(big_integer(GameProfile::UserId))
                    .col(string_len_uniq(GameProfile::Uuid, 36))
                    .col(string_len(GameProfile::Name, 32))
                    .col(big_integer_null(GameProfile::SkinLibraryId))
                    .col(big_integer_null(GameProfile::CapeLibraryId))
                    .col(timestamp(GameProfile::CreatedAt))
                    .col(timestamp(GameProfile::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Storage-level guard for the rename path, which checks uniqueness outside a lock
        manager
            .create_index(
                Index::create()
                    .name(UK_GAME_PROFILE_NAME)
                    .table(GameProfile::Table)
                    .col(GameProfile::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        for (name, col) in [
            (IDX_GAME_PROFILE_USER_ID, GameProfile::UserId),
            (IDX_GAME_PROFILE_SKIN_LIBRARY_ID, GameProfile::SkinLibraryId),
            (IDX_GAME_PROFILE_CAPE_LIBRARY_ID, GameProfile::CapeLibraryId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(GameProfile::Table)
                        .col(col)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_GAME_PROFILE_USER_ID)
                    .from_tbl(GameProfile::Table)
                    .from_col(GameProfile::UserId)
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
                    .name(FK_GAME_PROFILE_USER_ID)
                    .table(GameProfile::Table)
                    .to_owned(),
            )
            .await?;

        for name in [
            IDX_GAME_PROFILE_CAPE_LIBRARY_ID,
            IDX_GAME_PROFILE_SKIN_LIBRARY_ID,
            IDX_GAME_PROFILE_USER_ID,
            UK_GAME_PROFILE_NAME,
        ] {
            manager
                .drop_index(
                    Index::drop()
                        .name(name)
                        .table(GameProfile::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_table(Table::drop().table(GameProfile::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum GameProfile {
    Table,
    Id,
    UserId,
    Uuid,
    Name,
    SkinLibraryId,
    CapeLibraryId,
    CreatedAt,
    UpdatedAt,
}
