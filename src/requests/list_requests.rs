use crate::login::require_user;
use crate::repository::lists::{self, CatalogGame};
use actix_web::{get, post, web, Error, HttpRequest, HttpResponse, Responder};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddEntryRequest {
    list_type: String,
    platform: String,
    catalog_id: i64,
    name: String,
    cover_url: Option<String>,
}

/// Callers delete either by entry id or by the (game, platform, list) key,
/// depending on which they have at hand.
#[derive(Deserialize)]
#[serde(untagged)]
enum RemoveEntryRequest {
    #[serde(rename_all = "camelCase")]
    ById { entry_id: String },
    #[serde(rename_all = "camelCase")]
    ByKey {
        catalog_id: i64,
        platform: String,
        list_type: String,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListQuery {
    list_type: String,
}

#[post("/add-entry")]
pub async fn add_list_entry(
    db: web::Data<DatabaseConnection>,
    request: web::Json<AddEntryRequest>,
    http_request: HttpRequest,
) -> Result<impl Responder, Error> {
    let db = db.get_ref();
    let user = require_user(&http_request, db).await?;

    let request = request.into_inner();

    let entry = lists::add_entry(
        db,
        &user.id,
        &request.list_type,
        &request.platform,
        CatalogGame {
            igdb_id: request.catalog_id,
            name: request.name,
            cover_url: request.cover_url,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(entry))
}

#[post("/remove-entry")]
pub async fn remove_list_entry(
    db: web::Data<DatabaseConnection>,
    request: web::Json<RemoveEntryRequest>,
    http_request: HttpRequest,
) -> Result<impl Responder, Error> {
    let db = db.get_ref();
    let user = require_user(&http_request, db).await?;

    match request.into_inner() {
        RemoveEntryRequest::ById { entry_id } => {
            lists::remove_entry_by_id(db, &user.id, &entry_id).await?;
        }
        RemoveEntryRequest::ByKey {
            catalog_id,
            platform,
            list_type,
        } => {
            lists::remove_entry_by_key(db, &user.id, catalog_id, &platform, &list_type).await?;
        }
    }

    Ok(HttpResponse::Ok())
}

#[get("/list")]
pub async fn get_list(
    db: web::Data<DatabaseConnection>,
    query: web::Query<ListQuery>,
    http_request: HttpRequest,
) -> Result<impl Responder, Error> {
    let db = db.get_ref();
    let user = require_user(&http_request, db).await?;

    let groups = lists::entries_by_list(db, &user.id, &query.list_type).await?;

    Ok(HttpResponse::Ok().json(groups))
}
