//! Generator configuration
//!
//! Loaded from TOML. Every field is optional in the file:
//!
//! ```toml
//! as_of = "2024-06-01T12:00:00Z"
//!
//! [default_coordinate]
//! lat = 40.7128
//! lng = -74.006
//!
//! [counts]
//! zones = 4
//! initiatives = 7
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use civic_seed::Coordinate;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Coordinate used when the caller has no location
    pub default_coordinate: Coordinate,
    /// Fixed reference instant; the current time when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of: Option<DateTime<Utc>>,
    /// Per-domain count hints
    pub counts: CountHints,
}

/// Requested record counts, clamped per domain at generation time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CountHints {
    pub issues: Option<usize>,
    pub engagement: Option<usize>,
    pub zones: Option<usize>,
    pub initiatives: Option<usize>,
}

impl CountHints {
    /// The same hint for every domain
    #[inline]
    #[must_use]
    pub fn uniform(hint: Option<usize>) -> Self {
        Self {
            issues: hint,
            engagement: hint,
            zones: hint,
            initiatives: hint,
        }
    }
}

impl GeneratorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With default coordinate
    #[inline]
    #[must_use]
    pub fn with_default_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.default_coordinate = coordinate;
        self
    }

    /// With fixed reference instant
    #[inline]
    #[must_use]
    pub fn with_as_of(mut self, as_of: DateTime<Utc>) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// With count hints
    #[inline]
    #[must_use]
    pub fn with_counts(mut self, counts: CountHints) -> Self {
        self.counts = counts;
        self
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// [`ConfigError::Invalid`] for a non-finite default coordinate.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`GeneratorConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        tracing::info!(path = %path.display(), coordinate = %config.default_coordinate, "loaded generator config");
        Ok(config)
    }

    /// Check values that parse but cannot be used
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] describing the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_coordinate.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "default coordinate {} is not finite",
                self.default_coordinate
            )));
        }
        Ok(())
    }

    /// Reference instant, falling back to the current time
    #[inline]
    #[must_use]
    pub fn as_of_or_now(&self) -> DateTime<Utc> {
        self.as_of.unwrap_or_else(Utc::now)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_coordinate: Coordinate::DEFAULT,
            as_of: None,
            counts: CountHints::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = GeneratorConfig::from_toml_str("").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.default_coordinate, Coordinate::DEFAULT);
    }

    #[test]
    fn parses_full_document() {
        let raw = r#"
            as_of = "2024-06-01T12:00:00Z"

            [default_coordinate]
            lat = 40.7128
            lng = -74.006

            [counts]
            zones = 4
        "#;
        let config = GeneratorConfig::from_toml_str(raw).unwrap();
        assert_eq!(config.default_coordinate, Coordinate::new(40.7128, -74.006));
        assert_eq!(config.counts.zones, Some(4));
        assert_eq!(config.counts.issues, None);
        assert_eq!(
            config.as_of,
            DateTime::<Utc>::from_timestamp(1_717_243_200, 0)
        );
    }

    #[test]
    fn unknown_key_rejected() {
        let err = GeneratorConfig::from_toml_str("seed = 4").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn non_finite_coordinate_rejected() {
        let raw = "[default_coordinate]\nlat = nan\nlng = 1.0\n";
        let err = GeneratorConfig::from_toml_str(raw).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn builders() {
        let as_of = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        let config = GeneratorConfig::new()
            .with_as_of(as_of)
            .with_counts(CountHints::uniform(Some(6)));
        assert_eq!(config.as_of_or_now(), as_of);
        assert_eq!(config.counts.initiatives, Some(6));
    }
}
