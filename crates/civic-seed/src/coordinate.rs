//! Geographic coordinate input
//!
//! Provides [`Coordinate`], the immutable `(lat, lng)` pair every
//! synthesizer is keyed on.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A geographic coordinate in decimal degrees
///
/// No validation beyond what the caller supplies: seeds derived from
/// non-finite values collapse to zero instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

impl Coordinate {
    /// San Francisco, used when no geolocation is available
    pub const DEFAULT: Self = Self::new(37.7749, -122.4194);

    /// Create a new coordinate
    #[inline]
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check that both components are finite numbers
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Product `lat * lng`, the input of the base seed formula
    #[inline]
    #[must_use]
    pub fn product(&self) -> f64 {
        self.lat * self.lng
    }

    /// `lat + lng` rounded to the nearest integer
    ///
    /// Used as the per-index stride for area and zone seeds.
    #[inline]
    #[must_use]
    pub fn rounded_sum(&self) -> f64 {
        (self.lat + self.lng).round()
    }

    /// Coordinate shifted by the given deltas
    #[inline]
    #[must_use]
    pub fn offset(&self, d_lat: f64, d_lng: f64) -> Self {
        Self::new(self.lat + d_lat, self.lng + d_lng)
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl FromStr for Coordinate {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| SeedError::MalformedCoordinate(s.to_string()))?;
        let lat = parse_component(lat, "lat")?;
        let lng = parse_component(lng, "lng")?;
        Ok(Self::new(lat, lng))
    }
}

fn parse_component(raw: &str, name: &'static str) -> Result<f64, SeedError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| SeedError::InvalidComponent {
            component: name,
            value: raw.trim().to_string(),
        })?;
    if !value.is_finite() {
        return Err(SeedError::NonFinite { component: name });
    }
    Ok(value)
}

/// Errors that can occur when parsing coordinates
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeedError {
    /// Input was not of the form `lat,lng`
    #[error("malformed coordinate '{0}': expected 'lat,lng'")]
    MalformedCoordinate(String),

    /// A component failed to parse as a number
    #[error("invalid {component} value '{value}'")]
    InvalidComponent {
        component: &'static str,
        value: String,
    },

    /// A component parsed to NaN or infinity
    #[error("{component} must be a finite number")]
    NonFinite { component: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_san_francisco() {
        let c = Coordinate::default();
        assert_eq!(c.lat, 37.7749);
        assert_eq!(c.lng, -122.4194);
    }

    #[test]
    fn rounded_sum_rounds_negative_half_away() {
        assert_eq!(Coordinate::DEFAULT.rounded_sum(), -85.0);
        assert_eq!(Coordinate::new(1.2, 1.2).rounded_sum(), 2.0);
    }

    #[test]
    fn parse_and_display() {
        let c: Coordinate = "37.7749, -122.4194".parse().unwrap();
        assert_eq!(c, Coordinate::DEFAULT);
        assert_eq!(c.to_string(), "37.7749,-122.4194");
    }

    #[test]
    fn parse_rejects_missing_separator() {
        let err = "37.7749".parse::<Coordinate>().unwrap_err();
        assert!(matches!(err, SeedError::MalformedCoordinate(_)));
    }

    #[test]
    fn parse_rejects_garbage_component() {
        let err = "north,-1".parse::<Coordinate>().unwrap_err();
        assert_eq!(
            err,
            SeedError::InvalidComponent {
                component: "lat",
                value: "north".to_string()
            }
        );
    }

    #[test]
    fn parse_rejects_non_finite() {
        let err = "inf,2".parse::<Coordinate>().unwrap_err();
        assert_eq!(err, SeedError::NonFinite { component: "lat" });
    }

    #[test]
    fn offset_shifts_both_components() {
        let c = Coordinate::new(1.0, 2.0).offset(0.5, -0.5);
        assert_eq!(c, Coordinate::new(1.5, 1.5));
    }

    #[test]
    fn serde_json_shape() {
        let json = serde_json::to_string(&Coordinate::new(1.5, -2.0)).unwrap();
        assert_eq!(json, r#"{"lat":1.5,"lng":-2.0}"#);
    }
}
