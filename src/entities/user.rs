use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub username: String,
    /// Canonical lowercase form, all username lookups go through this column.
    #[sea_orm(unique)]
    #[serde(skip_serializing)]
    pub username_lower: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::session::Entity")]
    Session,
    #[sea_orm(has_many = "super::user_platform::Entity")]
    UserPlatform,
    #[sea_orm(has_many = "super::list_entry::Entity")]
    ListEntry,
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
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
