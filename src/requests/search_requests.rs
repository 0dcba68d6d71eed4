use crate::config::Config;
use crate::error::AppError;
use crate::igdb;
use crate::login::require_user;
use actix_web::{get, web, Error, HttpRequest, HttpResponse, Responder};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

const DEFAULT_SEARCH_LIMIT: u8 = 10;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchQuery {
    query: String,
    limit: Option<u8>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GamePlatformsQuery {
    game_id: i64,
}

#[get("/search")]
pub async fn search_catalog(
    db: web::Data<DatabaseConnection>,
    client: web::Data<reqwest::Client>,
    config: web::Data<Config>,
    query: web::Query<SearchQuery>,
    http_request: HttpRequest,
) -> Result<impl Responder, Error> {
    require_user(&http_request, db.get_ref()).await?;

    if query.query.trim().is_empty() {
        return Err(AppError::Validation(String::from("Search query must not be empty!")).into());
    }

    let entries = igdb::search_games(
        client.get_ref(),
        config.get_ref(),
        query.query.trim(),
        query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
    )
    .await?;

    Ok(HttpResponse::Ok().json(entries))
}

#[get("/game-platforms")]
pub async fn get_game_platforms(
    db: web::Data<DatabaseConnection>,
    client: web::Data<reqwest::Client>,
    config: web::Data<Config>,
    query: web::Query<GamePlatformsQuery>,
    http_request: HttpRequest,
) -> Result<impl Responder, Error> {
    require_user(&http_request, db.get_ref()).await?;

    let platforms =
        igdb::platforms_for_game(client.get_ref(), config.get_ref(), query.game_id).await?;

    Ok(HttpResponse::Ok().json(platforms))
}
