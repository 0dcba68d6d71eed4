use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Runtime configuration, read once at startup from the environment
/// (`.env` is loaded by `main` before this runs).
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub bind_port: u16,
    pub twitch_client_id: String,
    pub twitch_client_secret: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            database_url: required("DATABASE_URL"),
            bind_address: env_or("BIND_ADDRESS", "127.0.0.1"),
            bind_port: env_or("BIND_PORT", "8080"),
            twitch_client_id: required("TWITCH_CLIENT_ID"),
            twitch_client_secret: required("TWITCH_CLIENT_SECRET"),
        }
    }
}

fn required(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        log::error!("Environment variable {} is not set", key);
        std::process::exit(1);
    })
}

pub fn env_or<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());

    raw.parse().unwrap_or_else(|err| {
        log::warn!("Invalid {} value {:?} ({}), using default {}", key, raw, err, default);
        default.parse().ok().unwrap_or_else(|| {
            log::error!("Default for {} does not parse", key);
            std::process::exit(1);
        })
    })
}
