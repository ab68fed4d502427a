use crate::config::settings::AppConfig;
use crate::infrastructure::db::pool::DbPool;
use crate::modules::auth::token::TokenService;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(config: &AppConfig, db: DbPool) -> Self {
        let tokens = TokenService::new(&config.jwt_secret, config.access_token_ttl_minutes);
        Self { db, tokens }
    }
}
