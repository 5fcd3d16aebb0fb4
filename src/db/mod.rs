pub mod bets;
pub mod games;
pub mod users;

pub use bets::BetStore;
pub use games::GameStore;
pub use users::UserStore;

use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use tracing::info;

use crate::error::Result;

/// Open the SQLite pool and initialize the schema. The stores share one
/// pool so the unique index on bets and the status guard on games apply
/// across all callers.
pub async fn connect(database_url: &str) -> Result<Pool<Sqlite>> {
    // Create data directory if needed
    if let Some(path) = database_url.strip_prefix("sqlite:") {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
            }
        }
    }

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    init_schema(&pool).await?;

    info!("Database initialized");
    Ok(pool)
}

/// Create tables and indexes. The compound unique index on
/// (user_id, game_id) is the atomic guard against the duplicate-bet race.
async fn init_schema(pool: &Pool<Sqlite>) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            favorite_team TEXT,
            points INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS games (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            external_id TEXT NOT NULL UNIQUE,
            home_team TEXT NOT NULL,
            away_team TEXT NOT NULL,
            start_time TEXT NOT NULL,
            spread_tenths INTEGER NOT NULL,
            spread_team TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'upcoming',
            final_home_score INTEGER,
            final_away_score INTEGER
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            game_id INTEGER NOT NULL,
            selection TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            spread_at_bet_tenths INTEGER NOT NULL,
            favorite_team_at_bet TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // One bet per user per game
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_bets_user_game
        ON bets (user_id, game_id)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_bets_game_status
        ON bets (game_id, status)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_games_status_start
        ON games (status, start_time)
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
