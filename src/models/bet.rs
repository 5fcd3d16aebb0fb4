use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Spread;

/// One user's wager on one game. At most one bet exists per (user, game)
/// pair, enforced by a unique index in the bet store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bet {
    pub id: i64,

    pub user_id: i64,

    pub game_id: i64,

    /// Which side of the game the user took
    pub selection: BetSelection,

    pub status: BetStatus,

    /// The game's spread at placement time. Immutable snapshot: later line
    /// movement never changes how this bet settles.
    pub spread_at_bet: Spread,

    /// The user's favorite team at placement time. Immutable snapshot.
    pub favorite_team_at_bet: String,

    pub created_at: DateTime<Utc>,
}

/// The two sides of a bet, expressed relative to the user's favorite team.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BetSelection {
    /// The user's declared favorite team covers
    Favorite,
    /// The other team in the game covers
    Opponent,
}

impl BetSelection {
    pub fn as_str(&self) -> &'static str {
        match self {
            BetSelection::Favorite => "favorite",
            BetSelection::Opponent => "opponent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "favorite" => Some(BetSelection::Favorite),
            "opponent" => Some(BetSelection::Opponent),
            _ => None,
        }
    }
}

/// Bet lifecycle. Placement creates `Pending`; settlement moves it exactly
/// once to one of the terminal outcomes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BetStatus {
    Pending,
    Won,
    Lost,
    Push,
}

impl BetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BetStatus::Pending => "pending",
            BetStatus::Won => "won",
            BetStatus::Lost => "lost",
            BetStatus::Push => "push",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BetStatus::Pending),
            "won" => Some(BetStatus::Won),
            "lost" => Some(BetStatus::Lost),
            "push" => Some(BetStatus::Push),
            _ => None,
        }
    }
}
