use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Local cache of a catalog game, created lazily on first add-to-list and
/// shared across users.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "game")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub igdb_id: i64,
    pub name: String,
    pub cover_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::list_entry::Entity")]
    ListEntry,
}

impl Related<super::list_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ListEntry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
