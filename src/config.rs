use std::env;

use crate::catalog;
use crate::error::{Error, Result};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database path
    pub database_url: String,

    /// Odds-source sport key for the configured league
    pub sport_key: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let sport_key =
            env::var("SPORT_KEY").unwrap_or_else(|_| "basketball_nba".to_string());

        if catalog::sport(&sport_key).is_none() {
            return Err(Error::InvalidInput(format!(
                "SPORT_KEY '{sport_key}' is not a supported sport"
            )));
        }

        Ok(Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:data/pickspread.db".to_string()),

            sport_key,
        })
    }
}
