//! Creativity levels and the completion temperature they map to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("creativity level must be between 0 and {max}, got {0}", max = CreativityLevel::MAX)]
pub struct CreativityRangeError(pub i64);

/// Discrete creativity setting on the `0..=10` scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct CreativityLevel(u8);

impl CreativityLevel {
    pub const MAX: u8 = 10;

    pub fn new(level: u8) -> Result<Self, CreativityRangeError> {
        Self::try_from(i64::from(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// `level * 0.1`, with level 0 pinned to exactly `0.0`.
    pub fn temperature(self) -> Temperature {
        if self.0 == 0 {
            return Temperature::ZERO;
        }
        Temperature(f64::from(self.0) * 0.1)
    }
}

impl Default for CreativityLevel {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<i64> for CreativityLevel {
    type Error = CreativityRangeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (0..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(CreativityRangeError(value))
        }
    }
}

impl From<CreativityLevel> for u8 {
    fn from(level: CreativityLevel) -> Self {
        level.0
    }
}

impl FromStr for CreativityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| format!("not an integer: {s}"))?;
        Self::try_from(value).map_err(|e| e.to_string())
    }
}

impl fmt::Display for CreativityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sampling temperature in `[0.0, 1.0]` passed to the completion service.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Temperature(f64);

impl Temperature {
    pub const ZERO: Temperature = Temperature(0.0);

    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<CreativityLevel> for Temperature {
    fn from(level: CreativityLevel) -> Self {
        level.temperature()
    }
}
