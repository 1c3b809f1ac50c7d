// File: ./src/model/date.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One calendar date in either system (AD or BS).
/// No local validity check: the remote service decides whether a date exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTriple {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateTriple {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

impl fmt::Display for DateTriple {
    // Unpadded, matching the service's own rendering (e.g. "2080-9-31").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month, self.day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    AdToBs,
    BsToAd,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ad-to-bs" | "ad2bs" => Ok(Direction::AdToBs),
            "bs-to-ad" | "bs2ad" => Ok(Direction::BsToAd),
            other => Err(format!(
                "unknown direction '{}' (expected 'ad-to-bs' or 'bs-to-ad')",
                other
            )),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::AdToBs => write!(f, "AD to BS"),
            Direction::BsToAd => write!(f, "BS to AD"),
        }
    }
}

/// Outcome of one remote conversion call, decoded once at the client boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    Matched(DateTriple),
    NoMatch,
    Failed(String),
}

impl Conversion {
    pub fn into_option(self) -> Option<DateTriple> {
        match self {
            Conversion::Matched(d) => Some(d),
            Conversion::NoMatch | Conversion::Failed(_) => None,
        }
    }
}
