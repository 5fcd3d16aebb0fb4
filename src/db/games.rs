use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite};
use tracing::debug;

use crate::error::Result;
use crate::models::{Game, GameStatus, GameUpsert, Spread};

/// SQLite store for game records.
#[derive(Clone)]
pub struct GameStore {
    pool: Pool<Sqlite>,
}

impl GameStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Upsert a game keyed on its external id. This is the write interface
    /// of the odds-ingestion collaborator; a finished game is never
    /// overwritten, so re-ingesting a settled game is a no-op.
    pub async fn upsert(&self, game: &GameUpsert) -> Result<Game> {
        debug!(
            "Upserting game {}: {} @ {}, spread {} {}",
            game.external_id, game.away_team, game.home_team, game.spread_team, game.spread
        );

        sqlx::query(
            r#"
            INSERT INTO games (
                external_id, home_team, away_team, start_time,
                spread_tenths, spread_team, status
            ) VALUES (?, ?, ?, ?, ?, ?, 'upcoming')
            ON CONFLICT (external_id) DO UPDATE SET
                home_team = excluded.home_team,
                away_team = excluded.away_team,
                start_time = excluded.start_time,
                spread_tenths = excluded.spread_tenths,
                spread_team = excluded.spread_team
            WHERE games.status = 'upcoming'
            "#,
        )
        .bind(&game.external_id)
        .bind(&game.home_team)
        .bind(&game.away_team)
        .bind(game.start_time.to_rfc3339())
        .bind(game.spread.tenths())
        .bind(&game.spread_team)
        .execute(&self.pool)
        .await?;

        let stored = self
            .get_by_external_id(&game.external_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        Ok(stored)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Game>> {
        let row = sqlx::query_as::<_, GameRow>("SELECT * FROM games WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into()))
    }

    pub async fn get_by_external_id(&self, external_id: &str) -> Result<Option<Game>> {
        let row = sqlx::query_as::<_, GameRow>("SELECT * FROM games WHERE external_id = ?")
            .bind(external_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into()))
    }

    /// All games, newest start time first (admin view).
    pub async fn list_all(&self) -> Result<Vec<Game>> {
        let rows = sqlx::query_as::<_, GameRow>("SELECT * FROM games ORDER BY start_time DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// The earliest upcoming game involving `team` that has not started yet.
    pub async fn next_upcoming_for_team(&self, team: &str) -> Result<Option<Game>> {
        let row = sqlx::query_as::<_, GameRow>(
            r#"
            SELECT * FROM games
            WHERE status = 'upcoming'
              AND start_time > ?
              AND (home_team = ? OR away_team = ?)
            ORDER BY start_time ASC
            LIMIT 1
            "#,
        )
        .bind(Utc::now().to_rfc3339())
        .bind(team)
        .bind(team)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into()))
    }

    /// Compare-and-set transition to finished, writing the final scores.
    /// Returns false if the game was already finished, so a concurrent
    /// second settlement observes the transition and aborts.
    pub async fn finish_with_scores(
        &self,
        id: i64,
        final_home_score: i64,
        final_away_score: i64,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE games
            SET status = 'finished', final_home_score = ?, final_away_score = ?
            WHERE id = ? AND status = 'upcoming'
            "#,
        )
        .bind(final_home_score)
        .bind(final_away_score)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Database row representation
#[derive(sqlx::FromRow)]
struct GameRow {
    id: i64,
    external_id: String,
    home_team: String,
    away_team: String,
    start_time: String,
    spread_tenths: i64,
    spread_team: String,
    status: String,
    final_home_score: Option<i64>,
    final_away_score: Option<i64>,
}

impl From<GameRow> for Game {
    fn from(row: GameRow) -> Self {
        Game {
            id: row.id,
            external_id: row.external_id,
            home_team: row.home_team,
            away_team: row.away_team,
            start_time: parse_timestamp(&row.start_time),
            spread: Spread::from_tenths(row.spread_tenths),
            spread_team: row.spread_team,
            status: GameStatus::parse(&row.status).unwrap_or(GameStatus::Upcoming),
            final_home_score: row.final_home_score,
            final_away_score: row.final_away_score,
        }
    }
}

pub(crate) fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testutil::memory_pool;
    use chrono::Duration;

    fn upsert_fixture(external_id: &str, start_offset_hours: i64) -> GameUpsert {
        GameUpsert {
            external_id: external_id.to_string(),
            home_team: "Los Angeles Lakers".to_string(),
            away_team: "Boston Celtics".to_string(),
            start_time: Utc::now() + Duration::hours(start_offset_hours),
            spread: Spread::from_tenths(-45),
            spread_team: "Los Angeles Lakers".to_string(),
        }
    }

    #[tokio::test]
    async fn test_upsert_creates_then_updates() {
        let store = GameStore::new(memory_pool().await);

        let created = store.upsert(&upsert_fixture("evt-1", 24)).await.unwrap();
        assert_eq!(created.status, GameStatus::Upcoming);
        assert_eq!(created.spread, Spread::from_tenths(-45));

        // Line moves; same external id updates in place
        let mut moved = upsert_fixture("evt-1", 24);
        moved.spread = Spread::from_tenths(-60);
        let updated = store.upsert(&moved).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.spread, Spread::from_tenths(-60));
    }

    #[tokio::test]
    async fn test_upsert_never_touches_finished_game() {
        let store = GameStore::new(memory_pool().await);

        let game = store.upsert(&upsert_fixture("evt-2", -2)).await.unwrap();
        assert!(store.finish_with_scores(game.id, 110, 100).await.unwrap());

        let mut moved = upsert_fixture("evt-2", -2);
        moved.spread = Spread::from_tenths(-80);
        let after = store.upsert(&moved).await.unwrap();

        assert_eq!(after.status, GameStatus::Finished);
        assert_eq!(after.spread, Spread::from_tenths(-45));
        assert_eq!(after.final_home_score, Some(110));
    }

    #[tokio::test]
    async fn test_finish_with_scores_is_one_shot() {
        let store = GameStore::new(memory_pool().await);
        let game = store.upsert(&upsert_fixture("evt-3", -1)).await.unwrap();

        assert!(store.finish_with_scores(game.id, 104, 100).await.unwrap());
        // Second transition fails the status guard
        assert!(!store.finish_with_scores(game.id, 999, 0).await.unwrap());

        let stored = store.get_by_id(game.id).await.unwrap().unwrap();
        assert_eq!(stored.final_home_score, Some(104));
        assert_eq!(stored.final_away_score, Some(100));
    }

    #[tokio::test]
    async fn test_next_upcoming_for_team() {
        let store = GameStore::new(memory_pool().await);

        store.upsert(&upsert_fixture("evt-past", -5)).await.unwrap();
        store.upsert(&upsert_fixture("evt-later", 48)).await.unwrap();
        store.upsert(&upsert_fixture("evt-sooner", 12)).await.unwrap();

        let next = store
            .next_upcoming_for_team("Boston Celtics")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(next.external_id, "evt-sooner");

        assert!(store
            .next_upcoming_for_team("Miami Heat")
            .await
            .unwrap()
            .is_none());

        // Admin view lists everything, newest start first
        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].external_id, "evt-later");
        assert_eq!(all[2].external_id, "evt-past");
    }
}
