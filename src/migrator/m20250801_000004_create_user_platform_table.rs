use sea_orm_migration::prelude::*;

use super::m20250801_000001_create_user_table::User;
use super::m20250801_000003_create_platform_table::Platform;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250801_000004_create_user_platform_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserPlatform::Table)
                    .col(ColumnDef::new(UserPlatform::UserId).string().not_null())
                    .col(ColumnDef::new(UserPlatform::PlatformId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(UserPlatform::UserId)
                            .col(UserPlatform::PlatformId)
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_platform_user")
                            .from(UserPlatform::Table, UserPlatform::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_platform_platform")
                            .from(UserPlatform::Table, UserPlatform::PlatformId)
                            .to(Platform::Table, Platform::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserPlatform::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum UserPlatform {
    Table,
    UserId,
    PlatformId
}
