//! Three-level progress classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) of the red band.
pub const YELLOW_FROM: u8 = 40;

/// Upper bound (inclusive) of the yellow band.
pub const YELLOW_UNTIL: u8 = 90;

/// Color band of a completion percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressColor {
    /// Below 40%.
    Red,
    /// 40% to 90%, both inclusive.
    Yellow,
    /// Above 90%.
    Green,
}

impl ProgressColor {
    /// Classify a percentage.
    pub fn for_percentage(percentage: u8) -> Self {
        if percentage < YELLOW_FROM {
            Self::Red
        } else if percentage <= YELLOW_UNTIL {
            Self::Yellow
        } else {
            Self::Green
        }
    }

    /// RGB components used when drawing this band.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::Red => (231, 76, 60),
            Self::Yellow => (241, 196, 15),
            Self::Green => (46, 204, 113),
        }
    }

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
        }
    }
}

impl fmt::Display for ProgressColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_table() {
        assert_eq!(ProgressColor::for_percentage(0), ProgressColor::Red);
        assert_eq!(ProgressColor::for_percentage(39), ProgressColor::Red);
        assert_eq!(ProgressColor::for_percentage(40), ProgressColor::Yellow);
        assert_eq!(ProgressColor::for_percentage(90), ProgressColor::Yellow);
        assert_eq!(ProgressColor::for_percentage(91), ProgressColor::Green);
        assert_eq!(ProgressColor::for_percentage(100), ProgressColor::Green);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ProgressColor::Yellow).unwrap(),
            "\"yellow\""
        );
        assert_eq!(ProgressColor::Green.to_string(), "green");
    }
}
