use sea_orm_migration::prelude::*;

use super::m20250801_000001_create_user_table::User;
use super::m20250801_000003_create_platform_table::Platform;
use super::m20250801_000005_create_game_table::Game;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250801_000006_create_list_entry_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ListEntry::Table)
                    .col(
                        ColumnDef::new(ListEntry::Id)
                            .string()
                            .not_null()
                            .primary_key()
                    )
                    .col(ColumnDef::new(ListEntry::UserId).string().not_null())
                    .col(ColumnDef::new(ListEntry::GameId).string().not_null())
                    .col(ColumnDef::new(ListEntry::PlatformId).integer().not_null())
                    .col(ColumnDef::new(ListEntry::ListType).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_list_entry_user")
                            .from(ListEntry::Table, ListEntry::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_list_entry_game")
                            .from(ListEntry::Table, ListEntry::GameId)
                            .to(Game::Table, Game::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_list_entry_platform")
                            .from(ListEntry::Table, ListEntry::PlatformId)
                            .to(Platform::Table, Platform::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The dedup invariant lives here, not in application checks.
        manager
            .create_index(
                Index::create()
                    .name("idx_list_entry_unique_tuple")
                    .table(ListEntry::Table)
                    .col(ListEntry::UserId)
                    .col(ListEntry::GameId)
                    .col(ListEntry::PlatformId)
                    .col(ListEntry::ListType)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ListEntry::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ListEntry {
    Table,
    Id,
    UserId,
    GameId,
    PlatformId,
    ListType
}
