use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub health_recheck_secs: u64,
    pub default_role_id: i32,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            jwt_secret: env::var("JWT_SECRET")
                .context("JWT_SECRET must be set")?,
            token_ttl_minutes: env::var("TOKEN_TTL_MINUTES")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .context("TOKEN_TTL_MINUTES must be a number of minutes")?,
            health_recheck_secs: env::var("HEALTH_RECHECK_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("HEALTH_RECHECK_SECS must be a number of seconds")?,
            default_role_id: env::var("DEFAULT_ROLE_ID")
                .unwrap_or_else(|_| "2".to_string())
                .parse()
                .context("DEFAULT_ROLE_ID must be an integer")?,
            bcrypt_cost: match env::var("BCRYPT_COST") {
                Ok(raw) => raw.parse().context("BCRYPT_COST must be an integer")?,
                Err(_) => bcrypt::DEFAULT_COST,
            },
        })
    }
}
