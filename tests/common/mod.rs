use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracklog_backend::entities::user::Model as UserModel;
use tracklog_backend::login::password;
use tracklog_backend::migrator::Migrator;
use tracklog_backend::repository::users;

pub const PC: &str = "PC (Microsoft Windows)";
pub const SWITCH: &str = "Nintendo Switch";

/// Fresh in-memory database with the real schema. A single pooled connection,
/// otherwise every connection would see its own empty memory database.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);

    let db = Database::connect(options).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("run migrations");

    db
}

pub async fn register(db: &DatabaseConnection, username: &str) -> UserModel {
    let digest = password::hash("hunter2").expect("hash");

    users::create_user(
        db,
        username,
        &format!("{}@example.com", username.to_lowercase()),
        digest,
    )
    .await
    .expect("register user")
}
