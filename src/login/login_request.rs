use crate::entities::prelude::Session;
use crate::error::AppError;
use crate::login::{
    create_new_session, password, require_user, safe_redirect_target, REMEMBERED_SESSION_EXPIRE,
    SESSION_EXPIRE,
};
use crate::repository::users;
use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::{get, post, web, Error, HttpRequest, HttpResponse, Responder};
use regex::Regex;
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::{Deserialize, Serialize};

const REMEMBERED_SESSION_EXPIRE_DURATION: time::Duration = time::Duration::days(30);

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserSignupRequest {
    username: String,
    email: String,
    password: String,
    confirm: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserLoginRequest {
    username: String,
    password: String,
    #[serde(default)]
    remember: bool,
    next: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    username: String,
    session_expire: String,
    redirect_to: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest {
    current_password: String,
    new_password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChangeEmailRequest {
    email: String,
}

fn is_valid_email(email: &str) -> bool {
    let re = Regex::new(r"^[^@]+@[^@.]+\..+$").unwrap();
    re.is_match(email)
}

fn build_session_cookie(session_id: String, remember: bool) -> Cookie<'static> {
    let mut builder = Cookie::build("sessionId", session_id)
        .path("/")
        .http_only(true)
        .secure(cfg!(not(debug_assertions)))
        .same_site(SameSite::Strict);

    // ephemeral browser-session cookie unless the user asked to be remembered
    if remember {
        builder = builder.max_age(REMEMBERED_SESSION_EXPIRE_DURATION);
    }

    builder.finish()
}

#[post("/signup")]
pub async fn user_signup(
    db: web::Data<DatabaseConnection>,
    request: web::Json<UserSignupRequest>,
    http_request: HttpRequest,
) -> Result<impl Responder, Error> {
    let db = db.get_ref();
    let username = request.username.trim();

    if username.is_empty() || request.password.is_empty() {
        return Err(AppError::Validation(String::from(
            "Username and password must not be empty!",
        ))
        .into());
    }

    if request.password != request.confirm {
        return Err(AppError::Validation(String::from("Passwords do not match!")).into());
    }

    if !is_valid_email(&request.email) {
        return Err(AppError::Validation(String::from("Invalid Email!")).into());
    }

    // the expensive part, happens before any database work
    let password_hash = password::hash(&request.password)?;

    let user = users::create_user(db, username, &request.email, password_hash).await?;

    if let Some(session_cookie) = http_request.cookie("sessionId") {
        let _ = Session::delete_by_id(session_cookie.value()).exec(db).await;
    }

    let session_id = create_new_session(user.id, false, db).await?;

    Ok(HttpResponse::Created()
        .cookie(build_session_cookie(session_id, false))
        .json(LoginResponse {
            username: user.username,
            session_expire: SESSION_EXPIRE.to_string(),
            redirect_to: String::from("/"),
        }))
}

#[post("/login")]
pub async fn user_login(
    db: web::Data<DatabaseConnection>,
    request: web::Json<UserLoginRequest>,
    http_request: HttpRequest,
) -> Result<impl Responder, Error> {
    let db = db.get_ref();

    let user = users::authenticate(db, &request.username, &request.password).await?;

    if let Some(session_cookie) = http_request.cookie("sessionId") {
        let _ = Session::delete_by_id(session_cookie.value()).exec(db).await;
    }

    let session_id = create_new_session(user.id, request.remember, db).await?;

    let expire = if request.remember {
        REMEMBERED_SESSION_EXPIRE
    } else {
        SESSION_EXPIRE
    };

    Ok(HttpResponse::Ok()
        .cookie(build_session_cookie(session_id, request.remember))
        .json(LoginResponse {
            username: user.username,
            session_expire: expire.to_string(),
            redirect_to: safe_redirect_target(request.next.as_deref()),
        }))
}

#[post("/logout")]
pub async fn log_out(
    db: web::Data<DatabaseConnection>,
    http_request: HttpRequest,
) -> Result<impl Responder, Error> {
    let session_id = match http_request.cookie("sessionId") {
        Some(cookie) => String::from(cookie.value()),
        None => return Err(AppError::Unauthenticated.into()),
    };

    let db = db.get_ref();

    let response = Session::delete_by_id(&session_id)
        .exec(db)
        .await
        .map_err(AppError::Db)?;

    if response.rows_affected == 0 {
        return Err(AppError::SessionNotFound.into());
    }

    Ok(HttpResponse::Ok())
}

#[get("/me")]
pub async fn get_me(
    db: web::Data<DatabaseConnection>,
    http_request: HttpRequest,
) -> Result<impl Responder, Error> {
    let db = db.get_ref();
    let user = require_user(&http_request, db).await?;

    Ok(HttpResponse::Ok().json(user))
}

#[post("/change-password")]
pub async fn change_password(
    db: web::Data<DatabaseConnection>,
    request: web::Json<ChangePasswordRequest>,
    http_request: HttpRequest,
) -> Result<impl Responder, Error> {
    let db = db.get_ref();
    let user = require_user(&http_request, db).await?;

    if request.new_password.is_empty() {
        return Err(AppError::Validation(String::from("Password must not be empty!")).into());
    }

    if !password::verify(&request.current_password, &user.password_hash) {
        return Err(AppError::InvalidCredentials.into());
    }

    let password_hash = password::hash(&request.new_password)?;
    users::update_password(db, &user.id, password_hash).await?;

    Ok(HttpResponse::Ok())
}

#[post("/change-email")]
pub async fn change_email(
    db: web::Data<DatabaseConnection>,
    request: web::Json<ChangeEmailRequest>,
    http_request: HttpRequest,
) -> Result<impl Responder, Error> {
    let db = db.get_ref();
    let user = require_user(&http_request, db).await?;

    if !is_valid_email(&request.email) {
        return Err(AppError::Validation(String::from("Invalid Email!")).into());
    }

    users::update_email(db, &user.id, &request.email).await?;

    Ok(HttpResponse::Ok())
}
