use sqlx::{Pool, Sqlite};

use crate::catalog;
use crate::error::{Error, Result};
use crate::models::User;

/// SQLite store for user accounts and the points ledger.
#[derive(Clone)]
pub struct UserStore {
    pool: Pool<Sqlite>,
}

impl UserStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Create an account. Identity (OAuth etc.) is the caller's concern;
    /// this only records the profile row.
    pub async fn create(&self, email: &str, name: &str) -> Result<User> {
        let result = sqlx::query("INSERT INTO users (email, name) VALUES (?, ?)")
            .bind(email)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if Error::is_unique_violation(&e) {
                    Error::Conflict("An account with this email already exists")
                } else {
                    Error::Storage(e)
                }
            })?;

        Ok(User {
            id: result.last_insert_rowid(),
            email: email.to_string(),
            name: name.to_string(),
            favorite_team: None,
            points: 0,
        })
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into()))
    }

    /// Set the user's favorite team, validated against the catalog for the
    /// given sport. Existing bets keep their placement-time snapshot.
    pub async fn set_favorite_team(&self, id: i64, sport_key: &str, team: &str) -> Result<User> {
        if !catalog::is_valid_team(sport_key, team) {
            return Err(Error::InvalidInput(format!(
                "'{team}' is not a valid {sport_key} team"
            )));
        }

        let result = sqlx::query("UPDATE users SET favorite_team = ? WHERE id = ?")
            .bind(team)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("User"));
        }

        self.get_by_id(id).await?.ok_or(Error::NotFound("User"))
    }

    /// Atomic points award. A relative increment rather than read-modify-
    /// write, so settlements of different games can credit the same user
    /// concurrently without losing points.
    pub async fn increment_points(&self, id: i64, amount: i64) -> Result<()> {
        let result = sqlx::query("UPDATE users SET points = points + ? WHERE id = ?")
            .bind(amount)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("User"));
        }

        Ok(())
    }
}

/// Database row representation
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    name: String,
    favorite_team: Option<String>,
    points: i64,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            name: row.name,
            favorite_team: row.favorite_team,
            points: row.points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testutil::memory_pool;

    #[tokio::test]
    async fn test_create_and_set_favorite_team() {
        let store = UserStore::new(memory_pool().await);

        let user = store.create("ada@example.com", "Ada").await.unwrap();
        assert_eq!(user.points, 0);
        assert!(user.favorite_team.is_none());

        let updated = store
            .set_favorite_team(user.id, "basketball_nba", "Boston Celtics")
            .await
            .unwrap();
        assert_eq!(updated.favorite_team.as_deref(), Some("Boston Celtics"));
    }

    #[tokio::test]
    async fn test_set_favorite_team_rejects_unknown_team() {
        let store = UserStore::new(memory_pool().await);
        let user = store.create("ada@example.com", "Ada").await.unwrap();

        let err = store
            .set_favorite_team(user.id, "basketball_nba", "Springfield Isotopes")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let store = UserStore::new(memory_pool().await);
        store.create("ada@example.com", "Ada").await.unwrap();

        let err = store.create("ada@example.com", "Imposter").await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn test_increment_points() {
        let store = UserStore::new(memory_pool().await);
        let user = store.create("ada@example.com", "Ada").await.unwrap();

        store.increment_points(user.id, 100).await.unwrap();
        store.increment_points(user.id, 100).await.unwrap();

        let stored = store.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.points, 200);

        let err = store.increment_points(9999, 100).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
