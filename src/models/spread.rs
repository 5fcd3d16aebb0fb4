use std::fmt;

use serde::{Deserialize, Serialize};

/// A point spread with one decimal of precision, stored as signed tenths.
///
/// Spreads move in half-point increments (-4.5, -4.0, ...), and push
/// detection compares the adjusted margin to exactly zero. Keeping the value
/// in integer tenths makes that comparison exact; an `f64` spread would risk
/// a binary-rounding miss right at the push boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Spread(i64);

impl Spread {
    pub const ZERO: Spread = Spread(0);

    /// Construct from tenths of a point (e.g. -45 for a -4.5 spread).
    pub const fn from_tenths(tenths: i64) -> Self {
        Spread(tenths)
    }

    /// Construct from a point value, rounding to the nearest tenth.
    /// Rejects non-finite or absurdly large values from the odds feed.
    pub fn from_points(points: f64) -> Result<Self, String> {
        if !points.is_finite() {
            return Err(format!("spread must be finite, got {points}"));
        }
        let tenths = (points * 10.0).round();
        if tenths.abs() > 1_000.0 {
            return Err(format!("spread out of range: {points}"));
        }
        Ok(Spread(tenths as i64))
    }

    pub const fn tenths(self) -> i64 {
        self.0
    }

    pub fn points(self) -> f64 {
        self.0 as f64 / 10.0
    }
}

impl TryFrom<f64> for Spread {
    type Error = String;

    fn try_from(points: f64) -> Result<Self, Self::Error> {
        Spread::from_points(points)
    }
}

impl From<Spread> for f64 {
    fn from(spread: Spread) -> f64 {
        spread.points()
    }
}

impl fmt::Display for Spread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "+" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{}", sign, abs / 10, abs % 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        assert_eq!(Spread::from_points(-4.5).unwrap().tenths(), -45);
        assert_eq!(Spread::from_points(7.0).unwrap().tenths(), 70);
        assert_eq!(Spread::from_points(0.0).unwrap(), Spread::ZERO);
        assert!(Spread::from_points(f64::NAN).is_err());
        assert!(Spread::from_points(f64::INFINITY).is_err());
        assert!(Spread::from_points(5000.0).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Spread::from_tenths(-45).to_string(), "-4.5");
        assert_eq!(Spread::from_tenths(30).to_string(), "+3.0");
        assert_eq!(Spread::ZERO.to_string(), "+0.0");
    }

    #[test]
    fn test_serde_round_trip() {
        let spread = Spread::from_tenths(-45);
        let json = serde_json::to_string(&spread).unwrap();
        assert_eq!(json, "-4.5");
        let back: Spread = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spread);
    }
}
