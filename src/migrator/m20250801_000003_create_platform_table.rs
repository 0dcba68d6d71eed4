use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250801_000003_create_platform_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Platform::Table)
                    .col(
                        ColumnDef::new(Platform::Id)
                            .integer()
                            .not_null()
                            .primary_key()
                    )
                    .col(ColumnDef::new(Platform::Name).string().not_null().unique_key())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Platform::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Platform {
    Table,
    Id,
    Name
}
