//! Statutory wage regions.
//!
//! Vietnam is divided into four minimum-wage zones. The zone determines the
//! regional minimum wage and, through it, the unemployment insurance cap.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// One of the four statutory wage-floor zones.
///
/// Raw region codes coming from callers or configuration files are validated
/// on conversion, so an unknown zone fails fast instead of yielding a missing
/// cap further down the calculation.
///
/// # Example
///
/// ```
/// use vn_salary_engine::models::Region;
///
/// let region = Region::try_from(1u8).unwrap();
/// assert_eq!(region, Region::One);
/// assert!(Region::try_from(5u8).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Region {
    /// Region I (urban districts of Hanoi, Ho Chi Minh City and similar).
    One = 1,
    /// Region II.
    Two = 2,
    /// Region III.
    Three = 3,
    /// Region IV.
    Four = 4,
}

impl Region {
    /// All regions in ascending order.
    pub const ALL: [Region; 4] = [Region::One, Region::Two, Region::Three, Region::Four];

    /// Returns the numeric region code (1-4).
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Zero-based position, used to index per-region policy arrays.
    pub(crate) fn index(self) -> usize {
        self as usize - 1
    }
}

impl TryFrom<u8> for Region {
    type Error = EngineError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Region::One),
            2 => Ok(Region::Two),
            3 => Ok(Region::Three),
            4 => Ok(Region::Four),
            other => Err(EngineError::InvalidRegion {
                code: other.to_string(),
            }),
        }
    }
}

impl From<Region> for u8 {
    fn from(region: Region) -> Self {
        region.code()
    }
}

impl FromStr for Region {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<u8>()
            .map_err(|_| EngineError::InvalidRegion {
                code: trimmed.to_string(),
            })
            .and_then(Region::try_from)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
