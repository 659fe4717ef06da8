//! Review rating - half-point steps from 0.5 to 5.0

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A movie rating stored as a count of half points (1..=10)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

/// Why a raw value is not a valid rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RatingError {
    #[error("rating must be between 0.5 and 5.0")]
    OutOfRange,
    #[error("rating must be a multiple of 0.5")]
    NotHalfStep,
}

impl Rating {
    pub const MIN: f64 = 0.5;
    pub const MAX: f64 = 5.0;

    /// Validate a raw rating value
    pub fn new(value: f64) -> Result<Self, RatingError> {
        if !value.is_finite() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(RatingError::OutOfRange);
        }
        let halves = value * 2.0;
        if halves.fract() != 0.0 {
            return Err(RatingError::NotHalfStep);
        }
        Ok(Self(halves as u8))
    }

    /// Number of half points (1..=10)
    #[inline]
    pub fn halves(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn value(self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

impl TryFrom<f64> for Rating {
    type Error = RatingError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for f64 {
    fn from(rating: Rating) -> Self {
        rating.value()
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.value())
    }
}

impl Serialize for Rating {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        Rating::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Average of a set of ratings rounded to one decimal place
pub fn round_average(avg: f64) -> f64 {
    (avg * 10.0).round() / 10.0
}
