use crate::entities::prelude::{Session, User};
use crate::entities::session::ActiveModel as SessionModel;
use crate::entities::user::Model as UserModel;
use crate::error::AppError;
use actix_web::HttpRequest;
use chrono::{Duration, TimeDelta, Utc};
use sea_orm::{ActiveValue, DatabaseConnection, DbErr, EntityTrait, ModelTrait};
use uuid::Uuid;

pub mod login_request;
pub mod password;

pub const REMEMBERED_SESSION_EXPIRE: TimeDelta = Duration::days(30);
pub const SESSION_EXPIRE: TimeDelta = Duration::days(1);

pub async fn create_new_session(
    user_id: String,
    remember: bool,
    db: &DatabaseConnection,
) -> Result<String, AppError> {
    let session_id = Uuid::new_v4().to_string();

    let expire = if remember {
        REMEMBERED_SESSION_EXPIRE
    } else {
        SESSION_EXPIRE
    };

    let session = SessionModel {
        id: ActiveValue::Set(session_id.clone()),
        user_id: ActiveValue::Set(user_id),
        expire_date: ActiveValue::Set(Utc::now() + expire),
    };

    Session::insert(session).exec(db).await?;

    Ok(session_id)
}

pub async fn get_user_from_session(
    session_id: &str,
    db: &DatabaseConnection,
) -> Result<UserModel, AppError> {
    match Session::find_by_id(session_id).find_also_related(User).one(db).await? {
        Some((session, user_option)) => {
            if Utc::now() > session.expire_date {
                let _ = session.delete(db).await;
                return Err(AppError::SessionExpired);
            }

            user_option.ok_or_else(|| {
                AppError::Db(DbErr::RecordNotFound(String::from(
                    "user row for live session",
                )))
            })
        }
        None => Err(AppError::SessionNotFound),
    }
}

/// Guard call at the top of every handler that needs an identity.
pub async fn require_user(
    http_request: &HttpRequest,
    db: &DatabaseConnection,
) -> Result<UserModel, AppError> {
    let session_cookie = http_request
        .cookie("sessionId")
        .ok_or(AppError::Unauthenticated)?;

    get_user_from_session(session_cookie.value(), db).await
}

/// Post-login redirect target. Only root-relative paths survive; anything
/// that could leave the origin ("//evil.com", "https://evil.com", "/\evil")
/// collapses to "/".
pub fn safe_redirect_target(next: Option<&str>) -> String {
    match next {
        Some(target) if is_safe_redirect(target) => target.to_string(),
        _ => String::from("/"),
    }
}

fn is_safe_redirect(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//") && !target.starts_with("/\\")
}
