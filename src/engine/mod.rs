pub mod placement;
pub mod settlement;

pub use placement::PlacementEngine;
pub use settlement::{Settlement, SettlementEngine, POINTS_PER_WIN};
