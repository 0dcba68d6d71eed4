mod m20250801_000001_create_user_table;
mod m20250801_000002_create_session_table;
mod m20250801_000003_create_platform_table;
mod m20250801_000004_create_user_platform_table;
mod m20250801_000005_create_game_table;
mod m20250801_000006_create_list_entry_table;
mod m20250801_000007_seed_platforms;

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_000001_create_user_table::Migration),
            Box::new(m20250801_000002_create_session_table::Migration),
            Box::new(m20250801_000003_create_platform_table::Migration),
            Box::new(m20250801_000004_create_user_platform_table::Migration),
            Box::new(m20250801_000005_create_game_table::Migration),
            Box::new(m20250801_000006_create_list_entry_table::Migration),
            Box::new(m20250801_000007_seed_platforms::Migration)
        ]
    }
}
