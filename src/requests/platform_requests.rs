use crate::login::require_user;
use crate::repository::platforms;
use actix_web::{get, post, web, Error, HttpRequest, HttpResponse, Responder};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlatformRequest {
    platform: String,
}

/// Reference data, no identity needed.
#[get("/platforms")]
pub async fn get_platforms(db: web::Data<DatabaseConnection>) -> Result<impl Responder, Error> {
    let platforms = platforms::all_platforms(db.get_ref()).await?;

    Ok(HttpResponse::Ok().json(platforms))
}

#[get("/user-platforms")]
pub async fn get_user_platforms(
    db: web::Data<DatabaseConnection>,
    http_request: HttpRequest,
) -> Result<impl Responder, Error> {
    let db = db.get_ref();
    let user = require_user(&http_request, db).await?;

    let platforms = platforms::platforms_of_user(db, &user.id).await?;

    Ok(HttpResponse::Ok().json(platforms))
}

#[post("/add-platform")]
pub async fn add_platform(
    db: web::Data<DatabaseConnection>,
    request: web::Json<PlatformRequest>,
    http_request: HttpRequest,
) -> Result<impl Responder, Error> {
    let db = db.get_ref();
    let user = require_user(&http_request, db).await?;

    let platform = platforms::add_platform(db, &user.id, &request.platform).await?;

    Ok(HttpResponse::Created().json(platform))
}

#[post("/delete-platform")]
pub async fn delete_platform(
    db: web::Data<DatabaseConnection>,
    request: web::Json<PlatformRequest>,
    http_request: HttpRequest,
) -> Result<impl Responder, Error> {
    let db = db.get_ref();
    let user = require_user(&http_request, db).await?;

    platforms::remove_platform(db, &user.id, &request.platform).await?;

    Ok(HttpResponse::Ok())
}
