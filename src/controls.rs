use crate::error::{Result, TripError};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A categorical filter with an explicit "no filter" choice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub fn only(value: impl Into<String>) -> Self {
        Selection::Only(value.into())
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(v) => v == value,
        }
    }
}

impl FromStr for Selection {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") || s.eq_ignore_ascii_case("todas") {
            Ok(Selection::All)
        } else {
            Ok(Selection::Only(s.to_string()))
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("All"),
            Selection::Only(v) => f.write_str(v),
        }
    }
}

/// Minimum trip distance. `None` keeps every row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceThreshold(Option<f64>);

impl DistanceThreshold {
    pub const NO_FILTER: DistanceThreshold = DistanceThreshold(None);

    pub fn at_least(min: f64) -> Result<Self> {
        if !min.is_finite() || min < 0.0 {
            return Err(TripError::InvalidControl(format!(
                "distance threshold must be a non-negative number, got {min}"
            )));
        }
        Ok(DistanceThreshold(Some(min)))
    }

    pub fn value(&self) -> Option<f64> {
        self.0
    }

    pub fn admits(&self, distance: f64) -> bool {
        self.0.map_or(true, |min| distance >= min)
    }
}

impl Default for DistanceThreshold {
    fn default() -> Self {
        DistanceThreshold(Some(0.0))
    }
}

impl FromStr for DistanceThreshold {
    type Err = TripError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("none") {
            return Ok(DistanceThreshold::NO_FILTER);
        }
        let v = s
            .parse::<f64>()
            .map_err(|_| TripError::InvalidControl(format!("not a number: {s:?}")))?;
        DistanceThreshold::at_least(v)
    }
}

/// What the hourly average divides by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HourDivisor {
    /// Distinct local hours present in the filtered trips (completed or not).
    #[default]
    ObservedHours,
    /// Always 24.
    FullDay,
}

/// Current value of every panel control.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Controls {
    pub min_distance: DistanceThreshold,
    pub spender_city: Selection,
    pub spender_fleet: Selection,
    pub hourly_fleet: Selection,
    pub hourly_divisor: HourDivisor,
    pub city_fleet: Selection,
}
