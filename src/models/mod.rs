mod bet;
mod game;
mod spread;
mod user;

pub use bet::{Bet, BetSelection, BetStatus};
pub use game::{Game, GameStatus, GameUpsert};
pub use spread::Spread;
pub use user::User;
