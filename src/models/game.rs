use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Spread;

/// One scheduled or played contest, as supplied by the odds ingestion feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    /// Internal identifier
    pub id: i64,

    /// External odds-source game identifier (unique)
    pub external_id: String,

    pub home_team: String,

    pub away_team: String,

    /// Scheduled tip-off time
    pub start_time: DateTime<Utc>,

    /// Current spread line. Anchored to `spread_team`, not the home team.
    pub spread: Spread,

    /// The team the spread value is expressed for
    pub spread_team: String,

    pub status: GameStatus,

    /// Final score, present only once the game is settled
    pub final_home_score: Option<i64>,

    pub final_away_score: Option<i64>,
}

impl Game {
    /// True when `team` is one of the two sides of this game.
    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }
}

/// Game lifecycle. Transitions `Upcoming` -> `Finished` exactly once, driven
/// by settlement; finished games are immutable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Upcoming,
    Finished,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Upcoming => "upcoming",
            GameStatus::Finished => "finished",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "upcoming" => Some(GameStatus::Upcoming),
            "finished" => Some(GameStatus::Finished),
            _ => None,
        }
    }
}

/// Fields the ingestion collaborator supplies when upserting a game.
#[derive(Debug, Clone)]
pub struct GameUpsert {
    pub external_id: String,
    pub home_team: String,
    pub away_team: String,
    pub start_time: DateTime<Utc>,
    pub spread: Spread,
    pub spread_team: String,
}
