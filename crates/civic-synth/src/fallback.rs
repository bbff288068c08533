//! Upstream issue sources with synthesized fallback
//!
//! A live issue feed, when one is reachable, supersedes the generator.
//! [`issues_or_fallback`] returns the feed's records if it answers with a
//! non-empty list and synthesizes issues otherwise, so callers never see
//! an upstream failure.

use civic_seed::Coordinate;

use crate::error::SourceError;
use crate::issues::IssueSynthesizer;
use crate::synthesizer::{GenerationContext, Synthesizer};
use crate::types::CivicIssue;

/// A provider of real issue records
pub trait IssueSource {
    /// Fetch issues near `coordinate`
    ///
    /// # Errors
    /// Returns [`SourceError`] when the source is unreachable, answers with
    /// a failure status or returns an undecodable body.
    fn fetch(&self, coordinate: Coordinate) -> Result<Vec<CivicIssue>, SourceError>;
}

impl<F> IssueSource for F
where
    F: Fn(Coordinate) -> Result<Vec<CivicIssue>, SourceError>,
{
    fn fetch(&self, coordinate: Coordinate) -> Result<Vec<CivicIssue>, SourceError> {
        self(coordinate)
    }
}

/// Where a returned issue list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Records from the upstream source
    Source,
    /// Source was empty
    FallbackEmpty,
    /// Source failed
    FallbackError,
}

impl Provenance {
    /// Check if the records were synthesized
    #[inline]
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        !matches!(self, Self::Source)
    }
}

/// Issues from `source`, or synthesized issues when it fails or is empty
pub fn issues_or_fallback<S>(source: &S, ctx: &GenerationContext) -> Vec<CivicIssue>
where
    S: IssueSource + ?Sized,
{
    fetch_with_provenance(source, ctx).0
}

/// Like [`issues_or_fallback`], also reporting where the records came from
pub fn fetch_with_provenance<S>(source: &S, ctx: &GenerationContext) -> (Vec<CivicIssue>, Provenance)
where
    S: IssueSource + ?Sized,
{
    match source.fetch(ctx.coordinate) {
        Ok(issues) if !issues.is_empty() => (issues, Provenance::Source),
        Ok(_) => {
            tracing::warn!(coordinate = %ctx.coordinate, "issue source returned no records, using synthesized issues");
            (IssueSynthesizer.synthesize(ctx), Provenance::FallbackEmpty)
        }
        Err(err) => {
            tracing::warn!(
                coordinate = %ctx.coordinate,
                error = %err,
                retryable = err.is_retryable(),
                "issue source failed, using synthesized issues"
            );
            (IssueSynthesizer.synthesize(ctx), Provenance::FallbackError)
        }
    }
}

/// Source that never answers, for offline use
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSource;

impl IssueSource for OfflineSource {
    fn fetch(&self, _coordinate: Coordinate) -> Result<Vec<CivicIssue>, SourceError> {
        Err(SourceError::Unavailable("offline".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;

    fn ctx() -> GenerationContext {
        let as_of = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        GenerationContext::new(Coordinate::DEFAULT, as_of)
    }

    #[test]
    fn failing_source_falls_back() {
        let (issues, provenance) = fetch_with_provenance(&OfflineSource, &ctx());
        assert_eq!(provenance, Provenance::FallbackError);
        assert_eq!(issues, IssueSynthesizer.synthesize(&ctx()));
    }

    #[test]
    fn empty_source_falls_back() {
        let empty = |_: Coordinate| -> Result<Vec<CivicIssue>, SourceError> { Ok(Vec::new()) };
        let (issues, provenance) = fetch_with_provenance(&empty, &ctx());
        assert_eq!(provenance, Provenance::FallbackEmpty);
        assert!(provenance.is_fallback());
        assert!(!issues.is_empty());
    }

    #[test]
    fn live_records_supersede_generator() {
        let mut live = IssueSynthesizer.synthesize(&ctx());
        live.truncate(1);
        live[0].title = "Reported upstream".to_string();
        let expected = live.clone();

        let source = move |_: Coordinate| -> Result<Vec<CivicIssue>, SourceError> { Ok(live.clone()) };
        let issues = issues_or_fallback(&source, &ctx());
        assert_eq!(issues, expected);
    }

    #[test]
    fn status_error_falls_back() {
        let source = |_: Coordinate| -> Result<Vec<CivicIssue>, SourceError> { Err(SourceError::Status(502)) };
        let dyn_source: &dyn IssueSource = &source;
        assert_eq!(issues_or_fallback(dyn_source, &ctx()).len(), IssueSynthesizer.count(&ctx()));
    }
}
