mod common;

use common::{register, setup_db, PC, SWITCH};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tracklog_backend::entities::prelude::{Game, ListEntry, UserPlatform};
use tracklog_backend::entities::{list_entry, user_platform};
use tracklog_backend::error::AppError;
use tracklog_backend::login::password;
use tracklog_backend::repository::{lists, platforms, users};
use tracklog_backend::repository::lists::CatalogGame;

fn portal() -> CatalogGame {
    CatalogGame {
        igdb_id: 42,
        name: String::from("Portal"),
        cover_url: Some(String::from(
            "https://images.igdb.com/igdb/image/upload/t_cover_big/co1rs4.jpg",
        )),
    }
}

fn named_game(igdb_id: i64, name: &str) -> CatalogGame {
    CatalogGame {
        igdb_id,
        name: name.to_string(),
        cover_url: None,
    }
}

#[tokio::test]
async fn registering_same_username_conflicts_in_any_case() {
    let db = setup_db().await;
    register(&db, "Ann").await;

    for variant in ["Ann", "ann", "ANN"] {
        let digest = password::hash("hunter2").unwrap();
        let result = users::create_user(&db, variant, "other@example.com", digest).await;

        assert!(matches!(result, Err(AppError::UsernameTaken(_))));
    }
}

#[tokio::test]
async fn registering_same_email_conflicts() {
    let db = setup_db().await;
    register(&db, "Ann").await;

    let digest = password::hash("hunter2").unwrap();
    let result = users::create_user(&db, "Bob", "ann@example.com", digest).await;

    assert!(matches!(result, Err(AppError::EmailTaken(_))));
}

#[tokio::test]
async fn authenticate_is_case_insensitive_and_uniform_on_failure() {
    let db = setup_db().await;
    register(&db, "Ann").await;

    let user = users::authenticate(&db, "aNN", "hunter2").await.unwrap();
    assert_eq!(user.username, "Ann");

    let wrong_password = users::authenticate(&db, "Ann", "hunter3").await;
    assert!(matches!(wrong_password, Err(AppError::InvalidCredentials)));

    // unknown user reads exactly like a bad password
    let unknown_user = users::authenticate(&db, "Zoe", "hunter2").await;
    assert!(matches!(unknown_user, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn add_platform_checks_catalog_and_ownership() {
    let db = setup_db().await;
    let ann = register(&db, "Ann").await;

    let unknown = platforms::add_platform(&db, &ann.id, "Dreamcast").await;
    assert!(matches!(unknown, Err(AppError::UnknownPlatform(_))));

    // case-insensitive match against the canonical name
    let platform = platforms::add_platform(&db, &ann.id, "pc (microsoft windows)")
        .await
        .unwrap();
    assert_eq!(platform.name, PC);

    let again = platforms::add_platform(&db, &ann.id, PC).await;
    assert!(matches!(again, Err(AppError::AlreadyOwned(_))));
}

#[tokio::test]
async fn duplicate_entry_yields_exactly_one_row() {
    let db = setup_db().await;
    let ann = register(&db, "Ann").await;
    platforms::add_platform(&db, &ann.id, PC).await.unwrap();

    lists::add_entry(&db, &ann.id, "backlog", PC, portal())
        .await
        .unwrap();

    let second = lists::add_entry(&db, &ann.id, "backlog", PC, portal()).await;
    assert!(matches!(second, Err(AppError::DuplicateEntry)));

    let rows = ListEntry::find().all(&db).await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn same_game_on_another_list_or_platform_is_not_a_duplicate() {
    let db = setup_db().await;
    let ann = register(&db, "Ann").await;
    platforms::add_platform(&db, &ann.id, PC).await.unwrap();
    platforms::add_platform(&db, &ann.id, SWITCH).await.unwrap();

    lists::add_entry(&db, &ann.id, "backlog", PC, portal())
        .await
        .unwrap();
    lists::add_entry(&db, &ann.id, "playing", PC, portal())
        .await
        .unwrap();
    lists::add_entry(&db, &ann.id, "backlog", SWITCH, portal())
        .await
        .unwrap();

    assert_eq!(ListEntry::find().all(&db).await.unwrap().len(), 3);

    // one shared game row backs all three entries
    assert_eq!(Game::find().all(&db).await.unwrap().len(), 1);
}

#[tokio::test]
async fn add_entry_requires_owned_platform() {
    let db = setup_db().await;
    let ann = register(&db, "Ann").await;

    let unknown = lists::add_entry(&db, &ann.id, "backlog", "Dreamcast", portal()).await;
    assert!(matches!(unknown, Err(AppError::UnknownPlatform(_))));

    let not_owned = lists::add_entry(&db, &ann.id, "backlog", PC, portal()).await;
    assert!(matches!(not_owned, Err(AppError::PlatformNotOwned(_))));

    let blank_list = lists::add_entry(&db, &ann.id, "   ", PC, portal()).await;
    assert!(matches!(blank_list, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn removing_own_entry_removes_exactly_one_row() {
    let db = setup_db().await;
    let ann = register(&db, "Ann").await;
    platforms::add_platform(&db, &ann.id, PC).await.unwrap();

    let portal_entry = lists::add_entry(&db, &ann.id, "backlog", PC, portal())
        .await
        .unwrap();
    lists::add_entry(&db, &ann.id, "backlog", PC, named_game(7, "Half-Life"))
        .await
        .unwrap();

    lists::remove_entry_by_id(&db, &ann.id, &portal_entry.id)
        .await
        .unwrap();

    let groups = lists::entries_by_list(&db, &ann.id, "backlog").await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].games.len(), 1);
    assert_eq!(groups[0].games[0].name, "Half-Life");

    let missing = lists::remove_entry_by_id(&db, &ann.id, &portal_entry.id).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn removing_another_users_entry_is_forbidden_and_mutates_nothing() {
    let db = setup_db().await;
    let ann = register(&db, "Ann").await;
    let bob = register(&db, "Bob").await;
    platforms::add_platform(&db, &ann.id, PC).await.unwrap();

    let entry = lists::add_entry(&db, &ann.id, "backlog", PC, portal())
        .await
        .unwrap();

    let result = lists::remove_entry_by_id(&db, &bob.id, &entry.id).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    assert_eq!(ListEntry::find().all(&db).await.unwrap().len(), 1);
}

#[tokio::test]
async fn remove_entry_by_composite_key() {
    let db = setup_db().await;
    let ann = register(&db, "Ann").await;
    platforms::add_platform(&db, &ann.id, PC).await.unwrap();

    lists::add_entry(&db, &ann.id, "backlog", PC, portal())
        .await
        .unwrap();

    lists::remove_entry_by_key(&db, &ann.id, 42, PC, "backlog")
        .await
        .unwrap();
    assert!(ListEntry::find().all(&db).await.unwrap().is_empty());

    let gone = lists::remove_entry_by_key(&db, &ann.id, 42, PC, "backlog").await;
    assert!(matches!(gone, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn removing_platform_cascades_only_for_that_user() {
    let db = setup_db().await;
    let ann = register(&db, "Ann").await;
    let bob = register(&db, "Bob").await;

    platforms::add_platform(&db, &ann.id, PC).await.unwrap();
    platforms::add_platform(&db, &ann.id, SWITCH).await.unwrap();
    platforms::add_platform(&db, &bob.id, PC).await.unwrap();

    lists::add_entry(&db, &ann.id, "backlog", PC, portal())
        .await
        .unwrap();
    lists::add_entry(&db, &ann.id, "backlog", SWITCH, named_game(1029, "Celeste"))
        .await
        .unwrap();
    lists::add_entry(&db, &bob.id, "backlog", PC, portal())
        .await
        .unwrap();

    platforms::remove_platform(&db, &ann.id, PC).await.unwrap();

    let ann_entries = ListEntry::find()
        .filter(list_entry::Column::UserId.eq(&ann.id))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(ann_entries.len(), 1);

    let bob_entries = ListEntry::find()
        .filter(list_entry::Column::UserId.eq(&bob.id))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(bob_entries.len(), 1);

    let ann_platforms = UserPlatform::find()
        .filter(user_platform::Column::UserId.eq(&ann.id))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(ann_platforms.len(), 1);

    let not_owned = platforms::remove_platform(&db, &ann.id, PC).await;
    assert!(matches!(not_owned, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn listing_groups_by_platform_and_orders_by_name() {
    let db = setup_db().await;
    let ann = register(&db, "Ann").await;

    platforms::add_platform(&db, &ann.id, SWITCH).await.unwrap();
    platforms::add_platform(&db, &ann.id, PC).await.unwrap();

    lists::add_entry(&db, &ann.id, "backlog", PC, portal())
        .await
        .unwrap();
    lists::add_entry(&db, &ann.id, "backlog", PC, named_game(1029, "Celeste"))
        .await
        .unwrap();

    let groups = lists::entries_by_list(&db, &ann.id, "backlog").await.unwrap();

    // platform order is alphabetical; Switch is owned but empty and still listed
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].platform, SWITCH);
    assert!(groups[0].games.is_empty());
    assert_eq!(groups[1].platform, PC);

    let names: Vec<&str> = groups[1].games.iter().map(|game| game.name.as_str()).collect();
    assert_eq!(names, vec!["Celeste", "Portal"]);
}

#[tokio::test]
async fn ann_scenario_from_start_to_finish() {
    let db = setup_db().await;
    let ann = register(&db, "Ann").await;

    platforms::add_platform(&db, &ann.id, PC).await.unwrap();
    lists::add_entry(&db, &ann.id, "backlog", PC, portal())
        .await
        .unwrap();

    let groups = lists::entries_by_list(&db, &ann.id, "backlog").await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].platform, PC);
    assert_eq!(groups[0].games.len(), 1);
    assert_eq!(groups[0].games[0].name, "Portal");
    assert_eq!(groups[0].games[0].catalog_id, 42);

    let duplicate = lists::add_entry(&db, &ann.id, "backlog", PC, portal()).await;
    assert!(matches!(duplicate, Err(AppError::DuplicateEntry)));

    let groups = lists::entries_by_list(&db, &ann.id, "backlog").await.unwrap();
    assert_eq!(groups[0].games.len(), 1);
}
