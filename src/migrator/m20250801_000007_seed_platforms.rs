use sea_orm_migration::prelude::*;

use super::m20250801_000003_create_platform_table::Platform;

/// Canonical platforms, keyed by their IGDB platform ids. Names match the
/// catalog's spelling so `platformsForGame` results resolve by name directly.
const PLATFORMS: [(i32, &str); 12] = [
    (3, "Linux"),
    (6, "PC (Microsoft Windows)"),
    (14, "Mac"),
    (34, "Android"),
    (37, "Nintendo 3DS"),
    (39, "iOS"),
    (46, "PlayStation Vita"),
    (48, "PlayStation 4"),
    (49, "Xbox One"),
    (130, "Nintendo Switch"),
    (167, "PlayStation 5"),
    (169, "Xbox Series X|S"),
];

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250801_000007_seed_platforms"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert()
            .into_table(Platform::Table)
            .columns([Platform::Id, Platform::Name])
            .to_owned();

        for (id, name) in PLATFORMS {
            insert.values_panic([id.into(), name.into()]);
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete().from_table(Platform::Table).to_owned())
            .await
    }
}
