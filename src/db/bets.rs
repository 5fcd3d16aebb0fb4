use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::error::{Error, Result};
use crate::models::{Bet, BetSelection, BetStatus, Spread};

use super::games::parse_timestamp;

/// Fields fixed at placement time. Status always starts pending and the
/// timestamp is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewBet {
    pub user_id: i64,
    pub game_id: i64,
    pub selection: BetSelection,
    pub spread_at_bet: Spread,
    pub favorite_team_at_bet: String,
}

/// SQLite store for bets.
#[derive(Clone)]
pub struct BetStore {
    pool: Pool<Sqlite>,
}

impl BetStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Insert a new pending bet. The unique index on (user_id, game_id)
    /// decides the duplicate-bet race at commit time; the violation is
    /// surfaced as `Conflict` so a pre-existing bet is never overwritten.
    pub async fn create(&self, new_bet: NewBet) -> Result<Bet> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO bets (
                user_id, game_id, selection, status,
                spread_at_bet_tenths, favorite_team_at_bet, created_at
            ) VALUES (?, ?, ?, 'pending', ?, ?, ?)
            "#,
        )
        .bind(new_bet.user_id)
        .bind(new_bet.game_id)
        .bind(new_bet.selection.as_str())
        .bind(new_bet.spread_at_bet.tenths())
        .bind(&new_bet.favorite_team_at_bet)
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if Error::is_unique_violation(&e) {
                Error::Conflict("You have already placed a bet on this game")
            } else {
                Error::Storage(e)
            }
        })?;

        Ok(Bet {
            id: result.last_insert_rowid(),
            user_id: new_bet.user_id,
            game_id: new_bet.game_id,
            selection: new_bet.selection,
            status: BetStatus::Pending,
            spread_at_bet: new_bet.spread_at_bet,
            favorite_team_at_bet: new_bet.favorite_team_at_bet,
            created_at,
        })
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Bet>> {
        let row = sqlx::query_as::<_, BetRow>("SELECT * FROM bets WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into()))
    }

    /// All of a user's bets, newest first.
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<Bet>> {
        let rows = sqlx::query_as::<_, BetRow>(
            "SELECT * FROM bets WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Pending bets awaiting settlement for one game.
    pub async fn list_pending_by_game(&self, game_id: i64) -> Result<Vec<Bet>> {
        let rows = sqlx::query_as::<_, BetRow>(
            "SELECT * FROM bets WHERE game_id = ? AND status = 'pending' ORDER BY id ASC",
        )
        .bind(game_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Move a pending bet to its settled outcome. The status guard keeps
    /// the pending -> outcome transition one-shot; returns false if the bet
    /// was no longer pending.
    pub async fn settle(&self, id: i64, outcome: BetStatus) -> Result<bool> {
        let result =
            sqlx::query("UPDATE bets SET status = ? WHERE id = ? AND status = 'pending'")
                .bind(outcome.as_str())
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Database row representation
#[derive(sqlx::FromRow)]
struct BetRow {
    id: i64,
    user_id: i64,
    game_id: i64,
    selection: String,
    status: String,
    spread_at_bet_tenths: i64,
    favorite_team_at_bet: String,
    created_at: String,
}

impl From<BetRow> for Bet {
    fn from(row: BetRow) -> Self {
        Bet {
            id: row.id,
            user_id: row.user_id,
            game_id: row.game_id,
            selection: BetSelection::parse(&row.selection).unwrap_or(BetSelection::Favorite),
            status: BetStatus::parse(&row.status).unwrap_or(BetStatus::Pending),
            spread_at_bet: Spread::from_tenths(row.spread_at_bet_tenths),
            favorite_team_at_bet: row.favorite_team_at_bet,
            created_at: parse_timestamp(&row.created_at),
        }
    }
}
