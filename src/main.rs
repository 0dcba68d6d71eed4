use actix_cors::Cors;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use sea_orm::{Database, DbErr};
use sea_orm_migration::MigratorTrait;

use tracklog_backend::config::Config;
use tracklog_backend::login::login_request::{
    change_email, change_password, get_me, log_out, user_login, user_signup,
};
use tracklog_backend::migrator::Migrator;
use tracklog_backend::requests::list_requests::{add_list_entry, get_list, remove_list_entry};
use tracklog_backend::requests::platform_requests::{
    add_platform, delete_platform, get_platforms, get_user_platforms,
};
use tracklog_backend::requests::search_requests::{get_game_platforms, search_catalog};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::load();

    let db = Database::connect(&config.database_url)
        .await
        .unwrap_or_else(|db_err: DbErr| {
            eprintln!("Failed connecting to db: {}", db_err);
            std::process::exit(1);
        });

    if let Err(db_err) = Migrator::up(&db, None).await {
        eprintln!("Failed running migrations: {}", db_err);
        std::process::exit(1);
    }

    let client = reqwest::Client::new();
    let bind = (config.bind_address.clone(), config.bind_port);

    log::info!("Listening on {}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(Data::new(db.clone()))
            .app_data(Data::new(client.clone()))
            .app_data(Data::new(config.clone()))
            .service(user_signup)
            .service(user_login)
            .service(log_out)
            .service(get_me)
            .service(change_password)
            .service(change_email)
            .service(get_platforms)
            .service(get_user_platforms)
            .service(add_platform)
            .service(delete_platform)
            .service(search_catalog)
            .service(get_game_platforms)
            .service(get_list)
            .service(add_list_entry)
            .service(remove_list_entry)
    })
    .bind(bind)?
    .run()
    .await
}
