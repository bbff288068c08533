//! Read-only presentation helpers
//!
//! Grouping, filtering and ordering over synthesized records for tabbed
//! displays. Every function borrows its input and returns new
//! collections of references; records are never mutated or reordered in
//! place.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::tables::{InitiativeCategory, IssueCategory};
use crate::types::{CivicIssue, Initiative, InitiativeStatus, IssueStatus};

/// Record with a status drawn from a fixed set
pub trait HasStatus {
    type Status: Copy + Eq + 'static;

    /// Every status, in tab order
    const STATUSES: &'static [Self::Status];

    fn status(&self) -> Self::Status;
}

impl HasStatus for CivicIssue {
    type Status = IssueStatus;
    const STATUSES: &'static [IssueStatus] = IssueStatus::ALL;

    fn status(&self) -> IssueStatus {
        self.status
    }
}

impl HasStatus for Initiative {
    type Status = InitiativeStatus;
    const STATUSES: &'static [InitiativeStatus] = InitiativeStatus::ALL;

    fn status(&self) -> InitiativeStatus {
        self.status
    }
}

/// Record with exactly one category
pub trait HasCategory {
    type Category: Copy + Ord;

    fn category(&self) -> Self::Category;
}

impl HasCategory for CivicIssue {
    type Category = IssueCategory;

    fn category(&self) -> IssueCategory {
        self.category
    }
}

impl HasCategory for Initiative {
    type Category = InitiativeCategory;

    fn category(&self) -> InitiativeCategory {
        self.category
    }
}

/// One tab of a status-tabbed view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusTab<S> {
    pub status: S,
    pub count: usize,
}

/// Group records by key, groups ordered by first appearance
///
/// Records inside a group keep their input order.
pub fn group_by<T, K, F>(records: &[T], mut key: F) -> Vec<(K, Vec<&T>)>
where
    K: PartialEq,
    F: FnMut(&T) -> K,
{
    let mut groups: Vec<(K, Vec<&T>)> = Vec::new();
    for record in records {
        let k = key(record);
        match groups.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, members)) => members.push(record),
            None => groups.push((k, vec![record])),
        }
    }
    groups
}

/// Records matching `predicate`, in input order
pub fn filter_by<T, F>(records: &[T], mut predicate: F) -> Vec<&T>
where
    F: FnMut(&T) -> bool,
{
    records.iter().filter(|r| predicate(*r)).collect()
}

/// Records ordered by `compare`; equal records keep input order
pub fn sort_stable_by<T, F>(records: &[T], mut compare: F) -> Vec<&T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut sorted: Vec<&T> = records.iter().collect();
    sorted.sort_by(|a, b| compare(*a, *b));
    sorted
}

/// Count per status, listing every status even when empty
pub fn status_tabs<T: HasStatus>(records: &[T]) -> Vec<StatusTab<T::Status>> {
    T::STATUSES
        .iter()
        .map(|status| StatusTab {
            status: *status,
            count: records.iter().filter(|r| r.status() == *status).count(),
        })
        .collect()
}

/// Count per category present, in category order
pub fn category_counts<T: HasCategory>(records: &[T]) -> Vec<(T::Category, usize)> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.category()).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// Records with the given status, in input order
pub fn with_status<T: HasStatus>(records: &[T], status: T::Status) -> Vec<&T> {
    filter_by(records, |r| r.status() == status)
}
