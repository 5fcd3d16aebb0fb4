use chrono::Utc;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::db::{BetStore, GameStore, UserStore};
use crate::error::{Error, Result};
use crate::models::{Bet, BetSelection, BetStatus, Game, GameStatus, Spread};

/// Fixed award for a winning bet. Push and loss award nothing.
pub const POINTS_PER_WIN: i64 = 100;

/// Result of settling one game.
#[derive(Debug, Clone, Serialize)]
pub struct Settlement {
    pub game: Game,
    /// Bets moved out of pending
    pub settled_bets: usize,
    /// Total points credited to winners
    pub points_awarded: i64,
}

/// Resolves finished games: writes final scores, adjudicates every pending
/// bet against its placement-time snapshot, and credits the points ledger.
#[derive(Clone)]
pub struct SettlementEngine {
    games: GameStore,
    bets: BetStore,
    users: UserStore,
}

impl SettlementEngine {
    pub fn new(games: GameStore, bets: BetStore, users: UserStore) -> Self {
        Self { games, bets, users }
    }

    /// Settle a game with its final scores.
    ///
    /// Settlement is one-shot: the status transition is a compare-and-set,
    /// so of two concurrent calls exactly one performs the settlement and
    /// the other fails with `InvalidState` before touching any bet. A bet
    /// that cannot be resolved (deleted user, corrupt snapshot) is logged
    /// and skipped; it never aborts the rest of the batch.
    pub async fn settle_game(
        &self,
        game_id: &str,
        final_home_score: i64,
        final_away_score: i64,
    ) -> Result<Settlement> {
        let game_id = game_id
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| Error::InvalidInput(format!("Invalid game ID: '{game_id}'")))?;

        if final_home_score < 0 || final_away_score < 0 {
            return Err(Error::InvalidInput(
                "Final scores must be non-negative".to_string(),
            ));
        }

        let game = self
            .games
            .get_by_id(game_id)
            .await?
            .ok_or(Error::NotFound("Game"))?;

        if game.status == GameStatus::Finished {
            return Err(Error::InvalidState("Game has already been settled"));
        }

        if game.start_time > Utc::now() {
            return Err(Error::InvalidState(
                "Cannot settle a game that has not started",
            ));
        }

        // Terminal write. If another settlement got here first the guard
        // fails and we abort before reading any bets.
        let transitioned = self
            .games
            .finish_with_scores(game_id, final_home_score, final_away_score)
            .await?;
        if !transitioned {
            return Err(Error::InvalidState("Game has already been settled"));
        }

        info!(
            "Settling game {}: {} {} @ {} {}",
            game.external_id, game.away_team, final_away_score, game.home_team, final_home_score
        );

        let pending = self.bets.list_pending_by_game(game_id).await?;

        let mut settled_bets = 0;
        let mut points_awarded = 0;

        for bet in &pending {
            match self
                .settle_bet(bet, &game, final_home_score, final_away_score)
                .await
            {
                Ok(outcome) => {
                    settled_bets += 1;
                    if outcome == BetStatus::Won {
                        points_awarded += POINTS_PER_WIN;
                    }
                }
                Err(e) => {
                    error!("Failed to settle bet {}: {}", bet.id, e);
                }
            }
        }

        info!("Settled {} bets, awarded {} points", settled_bets, points_awarded);

        let game = self
            .games
            .get_by_id(game_id)
            .await?
            .ok_or(Error::NotFound("Game"))?;

        Ok(Settlement {
            game,
            settled_bets,
            points_awarded,
        })
    }

    /// Resolve one bet from its snapshots and the final scores, persist the
    /// outcome, and credit the winner.
    async fn settle_bet(
        &self,
        bet: &Bet,
        game: &Game,
        final_home_score: i64,
        final_away_score: i64,
    ) -> Result<BetStatus> {
        // Map the final scores onto the bet's snapshotted favorite team.
        // The snapshot must name one of the game's two sides; anything else
        // is corrupt data and the bet is left alone.
        let (favorite_score, opponent_score) = if bet.favorite_team_at_bet == game.home_team {
            (final_home_score, final_away_score)
        } else if bet.favorite_team_at_bet == game.away_team {
            (final_away_score, final_home_score)
        } else {
            return Err(Error::InvalidInput(format!(
                "bet snapshot team '{}' is not in this game",
                bet.favorite_team_at_bet
            )));
        };

        let outcome = adjudicate(bet.selection, bet.spread_at_bet, favorite_score, opponent_score);

        if !self.bets.settle(bet.id, outcome).await? {
            // Lost a race with another writer; the bet already has a
            // terminal status, so leave it be.
            warn!("Bet {} was no longer pending, skipping", bet.id);
            return Err(Error::InvalidState("Bet is not pending"));
        }

        if outcome == BetStatus::Won {
            self.users.increment_points(bet.user_id, POINTS_PER_WIN).await?;
        }

        Ok(outcome)
    }
}

/// Decide a bet's outcome from the final scores and its snapshotted spread.
///
/// The spread is anchored to the bet's favorite team: a -4.5 line means the
/// favorite must win by more than 4.5 to cover. The arithmetic is integer
/// tenths throughout so the push case is an exact comparison with zero.
pub fn adjudicate(
    selection: BetSelection,
    spread: Spread,
    favorite_score: i64,
    opponent_score: i64,
) -> BetStatus {
    let margin = favorite_score - opponent_score;
    let adjusted_margin_tenths = margin * 10 + spread.tenths();

    match (selection, adjusted_margin_tenths.signum()) {
        (_, 0) => BetStatus::Push,
        (BetSelection::Favorite, 1) | (BetSelection::Opponent, -1) => BetStatus::Won,
        _ => BetStatus::Lost,
    }
}
