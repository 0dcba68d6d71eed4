use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Reference data seeded by the migrator. Ids match the IGDB platform ids so
/// catalog responses line up with the local table without a mapping layer.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "platform")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_platform::Entity")]
    UserPlatform,
    #[sea_orm(has_many = "super::list_entry::Entity")]
    ListEntry,
}

impl Related<super::user_platform::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserPlatform.def()
    }
}

impl Related<super::list_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ListEntry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
