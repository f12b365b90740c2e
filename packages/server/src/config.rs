use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub relay_base_url: String,
    pub relay_api_key: String,
    /// How often the scheduler looks for due posts, in seconds.
    pub dispatch_interval_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            relay_base_url: env::var("RELAY_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:9100".to_string()),
            relay_api_key: env::var("RELAY_API_KEY").context("RELAY_API_KEY must be set")?,
            dispatch_interval_secs: env::var("DISPATCH_INTERVAL_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .context("DISPATCH_INTERVAL_SECS must be a valid number")?,
        })
    }
}
