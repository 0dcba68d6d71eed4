mod common;

use chrono::{Duration, Utc};
use common::{register, setup_db};
use sea_orm::{ActiveValue, EntityTrait};
use tracklog_backend::entities::prelude::Session;
use tracklog_backend::entities::session::ActiveModel as SessionModel;
use tracklog_backend::error::AppError;
use tracklog_backend::login::{create_new_session, get_user_from_session, password};
use tracklog_backend::repository::users;

#[tokio::test]
async fn session_resolves_back_to_its_user() {
    let db = setup_db().await;
    let ann = register(&db, "Ann").await;

    let session_id = create_new_session(ann.id.clone(), false, &db).await.unwrap();
    let user = get_user_from_session(&session_id, &db).await.unwrap();

    assert_eq!(user.id, ann.id);
    assert_eq!(user.username, "Ann");
}

#[tokio::test]
async fn unknown_session_is_rejected() {
    let db = setup_db().await;
    register(&db, "Ann").await;

    let result = get_user_from_session("no-such-session", &db).await;
    assert!(matches!(result, Err(AppError::SessionNotFound)));
}

#[tokio::test]
async fn expired_session_is_rejected_and_deleted() {
    let db = setup_db().await;
    let ann = register(&db, "Ann").await;

    let session = SessionModel {
        id: ActiveValue::Set(String::from("expired-session")),
        user_id: ActiveValue::Set(ann.id),
        expire_date: ActiveValue::Set(Utc::now() - Duration::hours(1)),
    };
    Session::insert(session).exec(&db).await.unwrap();

    let result = get_user_from_session("expired-session", &db).await;
    assert!(matches!(result, Err(AppError::SessionExpired)));

    // dead sessions are reaped on first touch
    let row = Session::find_by_id("expired-session").one(&db).await.unwrap();
    assert!(row.is_none());
}

#[tokio::test]
async fn remember_flag_extends_session_lifetime() {
    let db = setup_db().await;
    let ann = register(&db, "Ann").await;

    let short_id = create_new_session(ann.id.clone(), false, &db).await.unwrap();
    let long_id = create_new_session(ann.id.clone(), true, &db).await.unwrap();

    let short = Session::find_by_id(&short_id).one(&db).await.unwrap().unwrap();
    let long = Session::find_by_id(&long_id).one(&db).await.unwrap().unwrap();

    assert!(short.expire_date < Utc::now() + Duration::days(2));
    assert!(long.expire_date > Utc::now() + Duration::days(20));
}

#[tokio::test]
async fn password_update_invalidates_the_old_password() {
    let db = setup_db().await;
    let ann = register(&db, "Ann").await;

    let digest = password::hash("correct horse").unwrap();
    users::update_password(&db, &ann.id, digest).await.unwrap();

    let old = users::authenticate(&db, "Ann", "hunter2").await;
    assert!(matches!(old, Err(AppError::InvalidCredentials)));

    let user = users::authenticate(&db, "Ann", "correct horse").await.unwrap();
    assert_eq!(user.id, ann.id);
}

#[tokio::test]
async fn email_update_rejects_taken_addresses() {
    let db = setup_db().await;
    let ann = register(&db, "Ann").await;
    register(&db, "Bob").await;

    let taken = users::update_email(&db, &ann.id, "bob@example.com").await;
    assert!(matches!(taken, Err(AppError::EmailTaken(_))));

    // re-submitting your own address is a no-op, not a conflict
    users::update_email(&db, &ann.id, "ann@example.com").await.unwrap();

    users::update_email(&db, &ann.id, "ann@new.example.com").await.unwrap();
    let user = users::find_by_username_ci(&db, "ann").await.unwrap().unwrap();
    assert_eq!(user.email, "ann@new.example.com");
}
