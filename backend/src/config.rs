use anyhow::anyhow;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub token_expiration_days: u64,
    pub ml_service_url: String,
    pub ml_timeout_ms: u64,
    pub time_zone: Tz,
    pub cors_allowed_origins: Vec<String>,
    pub auth_rate_limit_per_minute: u32,
    pub ml_rate_limit_per_minute: u32,
    pub bind_addr: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/learntrack".to_string());

        let jwt_secret = env::var("JWT_SECRET")
            .unwrap_or_else(|_| "your-secret-key-change-this-in-production".to_string());

        let token_expiration_days = env::var("TOKEN_EXPIRATION_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .unwrap_or(7);

        let ml_service_url =
            env::var("ML_SERVICE_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());

        let ml_timeout_ms = env::var("ML_TIMEOUT_MS")
            .unwrap_or_else(|_| "15000".to_string())
            .parse()
            .unwrap_or(15_000);

        let time_zone_name = env::var("APP_TIMEZONE").unwrap_or_else(|_| "UTC".to_string());
        let time_zone: Tz = time_zone_name
            .parse()
            .map_err(|_| anyhow!("Invalid APP_TIMEZONE value: {}", time_zone_name))?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        let auth_rate_limit_per_minute = env::var("AUTH_RATE_LIMIT_PER_MINUTE")
            .unwrap_or_else(|_| "20".to_string())
            .parse()
            .unwrap_or(20);

        let ml_rate_limit_per_minute = env::var("ML_RATE_LIMIT_PER_MINUTE")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        Ok(Config {
            database_url,
            jwt_secret,
            token_expiration_days,
            ml_service_url,
            ml_timeout_ms,
            time_zone,
            cors_allowed_origins,
            auth_rate_limit_per_minute,
            ml_rate_limit_per_minute,
            bind_addr,
        })
    }
}
