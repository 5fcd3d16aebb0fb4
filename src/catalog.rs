//! Static sport/team reference data.
//!
//! Team names must match the odds-source vocabulary exactly (case-sensitive);
//! they are the join key between ingested games and user favorite teams.
//! The table is constant data with no runtime mutation path.

/// One supported sport and its valid team names.
#[derive(Debug, Clone, Copy)]
pub struct Sport {
    /// Odds-source sport key (e.g. `basketball_nba`)
    pub key: &'static str,
    /// Display name (e.g. `NBA`)
    pub name: &'static str,
    pub teams: &'static [&'static str],
}

const NBA_TEAMS: &[&str] = &[
    // Atlantic
    "Boston Celtics",
    "Brooklyn Nets",
    "New York Knicks",
    "Philadelphia 76ers",
    "Toronto Raptors",
    // Central
    "Chicago Bulls",
    "Cleveland Cavaliers",
    "Detroit Pistons",
    "Indiana Pacers",
    "Milwaukee Bucks",
    // Southeast
    "Atlanta Hawks",
    "Charlotte Hornets",
    "Miami Heat",
    "Orlando Magic",
    "Washington Wizards",
    // Northwest
    "Denver Nuggets",
    "Minnesota Timberwolves",
    "Oklahoma City Thunder",
    "Portland Trail Blazers",
    "Utah Jazz",
    // Pacific
    "Golden State Warriors",
    "Los Angeles Clippers",
    "Los Angeles Lakers",
    "Phoenix Suns",
    "Sacramento Kings",
    // Southwest
    "Dallas Mavericks",
    "Houston Rockets",
    "Memphis Grizzlies",
    "New Orleans Pelicans",
    "San Antonio Spurs",
];

const SPORTS: &[Sport] = &[Sport {
    key: "basketball_nba",
    name: "NBA",
    teams: NBA_TEAMS,
}];

/// All supported sports.
pub fn sports() -> &'static [Sport] {
    SPORTS
}

/// Look up a sport by its key.
pub fn sport(key: &str) -> Option<&'static Sport> {
    SPORTS.iter().find(|s| s.key == key)
}

/// Valid team names for a sport. Empty for an unknown sport key.
pub fn teams_for_sport(key: &str) -> &'static [&'static str] {
    sport(key).map(|s| s.teams).unwrap_or(&[])
}

/// Exact-match membership check.
pub fn is_valid_team(key: &str, team: &str) -> bool {
    teams_for_sport(key).contains(&team)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sport_lookup() {
        assert_eq!(sports().len(), 1);
        assert!(sport("basketball_nba").is_some());
        assert!(sport("icehockey_nhl").is_none());
        assert_eq!(sport("basketball_nba").unwrap().name, "NBA");
    }

    #[test]
    fn test_teams_for_sport() {
        assert_eq!(teams_for_sport("basketball_nba").len(), 30);
        assert!(teams_for_sport("unknown_sport").is_empty());
    }

    #[test]
    fn test_is_valid_team_exact_match() {
        assert!(is_valid_team("basketball_nba", "Boston Celtics"));
        // Case-sensitive: must match the odds-source spelling exactly
        assert!(!is_valid_team("basketball_nba", "boston celtics"));
        assert!(!is_valid_team("basketball_nba", "Seattle SuperSonics"));
        assert!(!is_valid_team("unknown_sport", "Boston Celtics"));
    }
}
