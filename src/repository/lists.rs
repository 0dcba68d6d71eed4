use crate::entities::game::{ActiveModel as GameActiveModel, Model as GameModel};
use crate::entities::list_entry::{ActiveModel as ListEntryActiveModel, Model as ListEntryModel};
use crate::entities::prelude::{Game, ListEntry, UserPlatform};
use crate::entities::{game, list_entry};
use crate::error::AppError;
use crate::repository::platforms;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, SqlErr,
};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// Catalog data needed to track a game locally.
pub struct CatalogGame {
    pub igdb_id: i64,
    pub name: String,
    pub cover_url: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedGame {
    pub entry_id: String,
    pub catalog_id: i64,
    pub name: String,
    pub cover_url: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGroup {
    pub platform: String,
    pub games: Vec<ListedGame>,
}

/// Resolves the platform and the (lazily cached) game, then inserts the
/// entry. The unique tuple index is the duplicate check, a concurrent
/// identical insert cannot produce two rows.
pub async fn add_entry(
    db: &DatabaseConnection,
    user_id: &str,
    list_type: &str,
    platform_name: &str,
    catalog_game: CatalogGame,
) -> Result<ListEntryModel, AppError> {
    let list_type = list_type.trim();

    if list_type.is_empty() {
        return Err(AppError::Validation(String::from(
            "List name must not be empty!",
        )));
    }

    if catalog_game.name.trim().is_empty() {
        return Err(AppError::Validation(String::from(
            "Game name must not be empty!",
        )));
    }

    let platform = platforms::find_by_name_ci(db, platform_name)
        .await?
        .ok_or_else(|| AppError::UnknownPlatform(platform_name.to_string()))?;

    if UserPlatform::find_by_id((user_id.to_string(), platform.id))
        .one(db)
        .await?
        .is_none()
    {
        return Err(AppError::PlatformNotOwned(platform.name));
    }

    let game = get_or_create_game(db, catalog_game).await?;

    let entry = ListEntryActiveModel {
        id: ActiveValue::Set(Uuid::new_v4().to_string()),
        user_id: ActiveValue::Set(user_id.to_string()),
        game_id: ActiveValue::Set(game.id),
        platform_id: ActiveValue::Set(platform.id),
        list_type: ActiveValue::Set(list_type.to_string()),
    };

    match entry.insert(db).await {
        Ok(model) => Ok(model),
        Err(err) => match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Err(AppError::DuplicateEntry),
            _ => Err(AppError::Db(err)),
        },
    }
}

/// Game rows are shared across users and keyed by the catalog id. When two
/// requests cache the same game at once the loser re-reads the winner's row.
async fn get_or_create_game(
    db: &DatabaseConnection,
    catalog_game: CatalogGame,
) -> Result<GameModel, AppError> {
    if let Some(game) = Game::find()
        .filter(game::Column::IgdbId.eq(catalog_game.igdb_id))
        .one(db)
        .await?
    {
        return Ok(game);
    }

    let game = GameActiveModel {
        id: ActiveValue::Set(Uuid::new_v4().to_string()),
        igdb_id: ActiveValue::Set(catalog_game.igdb_id),
        name: ActiveValue::Set(catalog_game.name),
        cover_url: ActiveValue::Set(catalog_game.cover_url),
    };

    match game.insert(db).await {
        Ok(model) => Ok(model),
        Err(err) => match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Game::find()
                .filter(game::Column::IgdbId.eq(catalog_game.igdb_id))
                .one(db)
                .await?
                .ok_or(AppError::Db(err)),
            _ => Err(AppError::Db(err)),
        },
    }
}

/// Deleting by primary key must prove ownership first; a foreign entry id is
/// an authorization failure, not a silent no-op.
pub async fn remove_entry_by_id(
    db: &DatabaseConnection,
    user_id: &str,
    entry_id: &str,
) -> Result<(), AppError> {
    let entry = ListEntry::find_by_id(entry_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(String::from("List entry not found!")))?;

    if entry.user_id != user_id {
        return Err(AppError::Forbidden(String::from(
            "This list entry belongs to another user!",
        )));
    }

    entry.delete(db).await?;

    Ok(())
}

/// Composite identifier variant, scoped to the calling user by construction.
pub async fn remove_entry_by_key(
    db: &DatabaseConnection,
    user_id: &str,
    catalog_id: i64,
    platform_name: &str,
    list_type: &str,
) -> Result<(), AppError> {
    let platform = platforms::find_by_name_ci(db, platform_name)
        .await?
        .ok_or_else(|| AppError::UnknownPlatform(platform_name.to_string()))?;

    let game = Game::find()
        .filter(game::Column::IgdbId.eq(catalog_id))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(String::from("List entry not found!")))?;

    let entry = ListEntry::find()
        .filter(
            list_entry::Column::UserId
                .eq(user_id)
                .and(list_entry::Column::GameId.eq(&game.id))
                .and(list_entry::Column::PlatformId.eq(platform.id))
                .and(list_entry::Column::ListType.eq(list_type)),
        )
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(String::from("List entry not found!")))?;

    entry.delete(db).await?;

    Ok(())
}

/// One group per owned platform, ordered by platform name; platforms with no
/// entries on this list still appear, with no games. Games are ordered by
/// name within each group.
pub async fn entries_by_list(
    db: &DatabaseConnection,
    user_id: &str,
    list_type: &str,
) -> Result<Vec<ListGroup>, AppError> {
    let owned_platforms = platforms::platforms_of_user(db, user_id).await?;

    let entries = ListEntry::find()
        .filter(
            list_entry::Column::UserId
                .eq(user_id)
                .and(list_entry::Column::ListType.eq(list_type)),
        )
        .find_also_related(Game)
        .all(db)
        .await?;

    let mut games_by_platform: HashMap<i32, Vec<ListedGame>> = HashMap::new();

    for (entry, game_option) in entries {
        let game = match game_option {
            Some(game) => game,
            None => {
                log::warn!("list entry {} has no game row", entry.id);
                continue;
            }
        };

        games_by_platform
            .entry(entry.platform_id)
            .or_default()
            .push(ListedGame {
                entry_id: entry.id,
                catalog_id: game.igdb_id,
                name: game.name,
                cover_url: game.cover_url,
            });
    }

    let groups = owned_platforms
        .into_iter()
        .map(|platform| {
            let mut games = games_by_platform.remove(&platform.id).unwrap_or_default();
            games.sort_by(|a, b| a.name.cmp(&b.name));

            ListGroup {
                platform: platform.name,
                games,
            }
        })
        .collect();

    Ok(groups)
}
