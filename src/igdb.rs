use crate::config::Config;
use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use lazy_static::lazy_static;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

const TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
const GAMES_URL: &str = "https://api.igdb.com/v4/games";
const COVER_URL_PREFIX: &str = "https://images.igdb.com/igdb/image/upload/t_cover_big/";

const MAX_SEARCH_LIMIT: u8 = 50;

lazy_static! {
    static ref ACCESS_TOKEN: Mutex<Option<CachedToken>> = Mutex::new(None);
}

struct CachedToken {
    token: String,
    expire_date: DateTime<Utc>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Deserialize, Debug)]
pub struct SearchedGame {
    pub id: i64,
    pub name: String,
    pub cover: Option<Cover>,
    #[serde(default)]
    pub platforms: Vec<PlatformRef>,
}

#[derive(Deserialize, Debug)]
pub struct Cover {
    pub image_id: String,
}

#[derive(Deserialize, Debug)]
pub struct PlatformRef {
    pub name: String,
}

#[derive(Deserialize, Debug)]
struct GamePlatforms {
    #[serde(default)]
    platforms: Vec<PlatformRef>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub catalog_id: i64,
    pub name: String,
    pub cover_url: Option<String>,
    pub platforms: Vec<String>,
}

impl From<SearchedGame> for CatalogEntry {
    fn from(game: SearchedGame) -> Self {
        CatalogEntry {
            catalog_id: game.id,
            name: game.name,
            cover_url: game.cover.map(|cover| cover_url(&cover.image_id)),
            platforms: game.platforms.into_iter().map(|platform| platform.name).collect(),
        }
    }
}

pub fn cover_url(image_id: &str) -> String {
    format!("{}{}.jpg", COVER_URL_PREFIX, image_id)
}

/// App access token for the IGDB API, refreshed shortly before it expires.
async fn access_token(client: &Client, config: &Config) -> Result<String, AppError> {
    let mut cached = ACCESS_TOKEN.lock().await;

    if let Some(token) = cached.as_ref() {
        if token.expire_date > Utc::now() + Duration::seconds(15) {
            return Ok(token.token.clone());
        }
    }

    let response = client
        .post(TOKEN_URL)
        .query(&[
            ("client_id", config.twitch_client_id.as_str()),
            ("client_secret", config.twitch_client_secret.as_str()),
            ("grant_type", "client_credentials"),
        ])
        .send()
        .await
        .map_err(|err| AppError::Upstream(err.to_string()))?
        .error_for_status()
        .map_err(|err| AppError::Upstream(err.to_string()))?
        .json::<TokenResponse>()
        .await
        .map_err(|err| AppError::Upstream(err.to_string()))?;

    let expire_date = Utc::now() + Duration::seconds(response.expires_in);

    *cached = Some(CachedToken {
        token: response.access_token.clone(),
        expire_date,
    });

    Ok(response.access_token)
}

async fn query_games(
    client: &Client,
    config: &Config,
    body: String,
) -> Result<reqwest::Response, AppError> {
    let token = access_token(client, config).await?;

    client
        .post(GAMES_URL)
        .header("Client-ID", &config.twitch_client_id)
        .bearer_auth(token)
        .body(body)
        .send()
        .await
        .map_err(|err| AppError::Upstream(err.to_string()))?
        .error_for_status()
        .map_err(|err| AppError::Upstream(err.to_string()))
}

pub async fn search_games(
    client: &Client,
    config: &Config,
    query: &str,
    limit: u8,
) -> Result<Vec<CatalogEntry>, AppError> {
    let limit = limit.clamp(1, MAX_SEARCH_LIMIT);

    let body = format!(
        "search \"{}\"; fields name,cover.image_id,platforms.name; limit {};",
        query.replace('"', ""),
        limit
    );

    let games = query_games(client, config, body)
        .await?
        .json::<Vec<SearchedGame>>()
        .await
        .map_err(|err| AppError::Upstream(err.to_string()))?;

    Ok(games.into_iter().map(CatalogEntry::from).collect())
}

pub async fn platforms_for_game(
    client: &Client,
    config: &Config,
    catalog_id: i64,
) -> Result<Vec<String>, AppError> {
    let body = format!("fields platforms.name; where id = {};", catalog_id);

    let mut games = query_games(client, config, body)
        .await?
        .json::<Vec<GamePlatforms>>()
        .await
        .map_err(|err| AppError::Upstream(err.to_string()))?;

    match games.pop() {
        Some(game) => Ok(game.platforms.into_iter().map(|platform| platform.name).collect()),
        None => Err(AppError::NotFound(format!(
            "Game with id {} could not be found in the catalog!",
            catalog_id
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn searched_game_maps_to_catalog_entry() {
        let raw = r#"[
            {
                "id": 7346,
                "name": "The Legend of Zelda: Breath of the Wild",
                "cover": { "id": 118154, "image_id": "co2hx9" },
                "platforms": [
                    { "id": 130, "name": "Nintendo Switch" },
                    { "id": 41, "name": "Wii U" }
                ]
            },
            { "id": 1022, "name": "Obscure Prototype" }
        ]"#;

        let games: Vec<SearchedGame> = serde_json::from_str(raw).unwrap();
        let entries: Vec<CatalogEntry> = games.into_iter().map(CatalogEntry::from).collect();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].catalog_id, 7346);
        assert_eq!(
            entries[0].cover_url.as_deref(),
            Some("https://images.igdb.com/igdb/image/upload/t_cover_big/co2hx9.jpg")
        );
        assert_eq!(entries[0].platforms, vec!["Nintendo Switch", "Wii U"]);

        assert_eq!(entries[1].cover_url, None);
        assert!(entries[1].platforms.is_empty());
    }
}
