use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::odds::ProjectionError;

/// Nominal length of the match phase being projected, before stoppage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum RegulationLength {
    /// One half: the clock stops at 45.
    Half,
    /// Full match: the clock stops at 90.
    Full,
}

impl RegulationLength {
    pub fn minutes(self) -> i32 {
        match self {
            RegulationLength::Half => 45,
            RegulationLength::Full => 90,
        }
    }
}

impl From<RegulationLength> for i32 {
    fn from(r: RegulationLength) -> i32 {
        r.minutes()
    }
}

impl TryFrom<i32> for RegulationLength {
    type Error = ProjectionError;

    fn try_from(minutes: i32) -> Result<Self, Self::Error> {
        match minutes {
            45 => Ok(RegulationLength::Half),
            90 => Ok(RegulationLength::Full),
            other => Err(ProjectionError::UnsupportedRegulation(other)),
        }
    }
}

impl fmt::Display for RegulationLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}min", self.minutes())
    }
}

/// Betting market a projection is run for.
///
/// Minutes are match-clock minutes, so a second-half market ends at 90, not 45.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Market {
    FirstHalf,
    SecondHalf,
    FullTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown market '{0}' (expected first-half, second-half or full-time)")]
pub struct MarketParseError(pub String);

impl Market {
    pub const ALL: [Market; 3] = [Market::FirstHalf, Market::SecondHalf, Market::FullTime];

    pub fn key(self) -> &'static str {
        match self {
            Market::FirstHalf => "first-half",
            Market::SecondHalf => "second-half",
            Market::FullTime => "full-time",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Market::FirstHalf => "1st Half (45min)",
            Market::SecondHalf => "2nd Half (45min)",
            Market::FullTime => "Full Time (90min)",
        }
    }

    pub fn regulation(self) -> RegulationLength {
        match self {
            Market::FirstHalf => RegulationLength::Half,
            Market::SecondHalf | Market::FullTime => RegulationLength::Full,
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Market {
    type Err = MarketParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "first-half" | "first_half" | "1h" | "1st half (45min)" => Ok(Market::FirstHalf),
            "second-half" | "second_half" | "2h" | "2nd half (45min)" => Ok(Market::SecondHalf),
            "full-time" | "full_time" | "ft" | "full time (90min)" => Ok(Market::FullTime),
            _ => Err(MarketParseError(s.to_string())),
        }
    }
}
