use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Config;
use crate::services::{HealthMonitor, TokenService};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub health: Arc<HealthMonitor>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        let health = HealthMonitor::new(
            db.clone(),
            std::time::Duration::from_secs(config.health_recheck_secs),
        );
        let tokens = TokenService::new(&config.jwt_secret, config.token_ttl_minutes);

        Self {
            db,
            config: Arc::new(config),
            health: Arc::new(health),
            tokens: Arc::new(tokens),
        }
    }
}
