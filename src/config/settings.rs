use std::str::FromStr;

use serde::Deserialize;

use crate::config::env::{self, EnvKey};

/// Selects the log output format.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    /// Human-readable output at debug level.
    #[default]
    Local,
    /// JSON output at info level.
    Dev,
}

impl FromStr for AppEnv {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(AppEnv::Local),
            "dev" => Ok(AppEnv::Dev),
            other => Err(format!("unknown APP_ENV: {other}")),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub app_env: AppEnv,
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub access_token_ttl_minutes: i64,
}

impl AppConfig {
    pub fn new() -> Result<Self, std::env::VarError> {
        Ok(Self {
            server_host: env::get_or(EnvKey::ServerHost, "0.0.0.0"),
            server_port: env::get_parsed(EnvKey::ServerPort, 8080),
            app_env: env::get_parsed(EnvKey::AppEnv, AppEnv::Local),
            database_url: env::get(EnvKey::DatabaseUrl)?,
            database_max_connections: env::get_parsed(EnvKey::DatabaseMaxConnections, 20),
            jwt_secret: env::get(EnvKey::JwtSecret)?,
            access_token_ttl_minutes: env::get_parsed(EnvKey::JwtAccessTokenTtlMinutes, 15),
        })
    }
}
