use chrono::Utc;
use tracing::info;

use crate::db::{bets::NewBet, BetStore, GameStore, UserStore};
use crate::error::{Error, Result};
use crate::models::{Bet, BetSelection, GameStatus};

/// Validates and creates wagers.
///
/// Eligibility checks run in a fixed order so each rejection maps to one
/// stable error. The final duplicate check is not done here at all: the bet
/// store's unique index decides it at commit time, which is what makes two
/// concurrent placements for the same (user, game) resolve to exactly one
/// success.
#[derive(Clone)]
pub struct PlacementEngine {
    games: GameStore,
    bets: BetStore,
    users: UserStore,
}

impl PlacementEngine {
    pub fn new(games: GameStore, bets: BetStore, users: UserStore) -> Self {
        Self { games, bets, users }
    }

    /// Place a bet for `user_id` on the game identified by `game_id`.
    ///
    /// The created bet carries snapshots of the game's spread and the
    /// user's favorite team; later line movement or a favorite-team change
    /// never affects how it settles.
    pub async fn place_bet(
        &self,
        user_id: i64,
        game_id: &str,
        selection: BetSelection,
    ) -> Result<Bet> {
        let game_id = parse_game_id(game_id)?;

        let user = self
            .users
            .get_by_id(user_id)
            .await?
            .ok_or(Error::NotFound("User"))?;

        let favorite_team = match user.favorite_team {
            Some(team) if !team.is_empty() => team,
            _ => {
                return Err(Error::Ineligible(
                    "You must set a favorite team before placing bets",
                ))
            }
        };

        let game = self
            .games
            .get_by_id(game_id)
            .await?
            .ok_or(Error::NotFound("Game"))?;

        if !game.involves(&favorite_team) {
            return Err(Error::Ineligible(
                "You can only bet on games involving your favorite team",
            ));
        }

        if game.start_time <= Utc::now() {
            return Err(Error::InvalidState(
                "Cannot place a bet on a game that has already started",
            ));
        }

        if game.status == GameStatus::Finished {
            return Err(Error::InvalidState("Cannot place a bet on a finished game"));
        }

        let bet = self
            .bets
            .create(NewBet {
                user_id,
                game_id,
                selection,
                spread_at_bet: game.spread,
                favorite_team_at_bet: favorite_team,
            })
            .await?;

        info!(
            "Bet {} placed: user {} took {} on game {} at {}",
            bet.id,
            user_id,
            selection.as_str(),
            game.external_id,
            bet.spread_at_bet
        );

        Ok(bet)
    }

    /// A user's bets, newest first.
    pub async fn list_user_bets(&self, user_id: i64) -> Result<Vec<Bet>> {
        self.bets.list_by_user(user_id).await
    }

    pub async fn get_bet(&self, bet_id: i64) -> Result<Option<Bet>> {
        self.bets.get_by_id(bet_id).await
    }
}

fn parse_game_id(game_id: &str) -> Result<i64> {
    game_id
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| Error::InvalidInput(format!("Invalid game ID: '{game_id}'")))
}
