use serde::{Deserialize, Serialize};

/// A player account. The engines read `favorite_team` at placement and
/// increment `points` at settlement; everything else is profile data owned
/// by the surrounding system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    pub email: String,

    pub name: String,

    /// Declared favorite team. Must be set before the user can bet.
    pub favorite_team: Option<String>,

    /// Cumulative points balance
    pub points: i64,
}
