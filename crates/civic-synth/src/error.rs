//! Error types for Civic Synth
//!
//! The synthesizers themselves are total over their input and never
//! return errors. Errors arise only at the edges:
//! - Runtime-assembled category tables that turn out empty
//! - Configuration loading
//! - Upstream record sources that the fallback path shields callers from

use std::path::PathBuf;

/// Main synthesis error type
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// A category table was constructed without entries
    #[error("category table '{table}' must not be empty")]
    EmptyTable { table: &'static str },

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Upstream record source failed
    #[error("source error: {0}")]
    Source(#[from] SourceError),
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML did not match the configuration schema
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parsed but are inconsistent
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors reported by an upstream issue source
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// Source could not be reached
    #[error("source unavailable: {0}")]
    Unavailable(String),

    /// Source answered with a non-success status
    #[error("source returned status {0}")]
    Status(u16),

    /// Source answered with a body that could not be decoded
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl SourceError {
    /// Check if a later attempt could succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Unavailable(_) => true,
            Self::Status(code) => *code >= 500,
            Self::Malformed(_) => false,
        }
    }
}
