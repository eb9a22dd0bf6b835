//! Active filter sets
//!
//! Keeps insertion order and drops duplicates using [`Filter`] equality, so
//! re-adding `Message contains TIMEOUT` next to `Message contains timeout` is a no-op.

use std::borrow::Borrow;

use crate::data::types::{LogEntry, Span};

use super::error::FilterError;
use super::eval::FilteredLogs;
use super::types::Filter;

/// Ordered, deduplicated collection of filters combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter; returns false if an equal filter is already present
    pub fn insert(&mut self, filter: Filter) -> bool {
        if self.filters.contains(&filter) {
            tracing::debug!(filter = ?filter, "Duplicate filter ignored");
            return false;
        }
        self.filters.push(filter);
        true
    }

    /// Remove the filter equal to `filter`; returns false if none matched
    pub fn remove(&mut self, filter: &Filter) -> bool {
        let before = self.filters.len();
        self.filters.retain(|f| f != filter);
        self.filters.len() != before
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Filter> {
        self.filters.iter()
    }

    /// Lazily yield entries matched by every filter.
    ///
    /// Fails up front if any filter cannot be compiled. An empty set passes everything.
    pub fn apply_all<I>(&self, entries: I) -> Result<FilteredLogs<'_, I::IntoIter>, FilterError>
    where
        I: IntoIterator,
        I::Item: Borrow<LogEntry>,
    {
        let predicates = self
            .filters
            .iter()
            .map(Filter::compile_log)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FilteredLogs::new(predicates, entries.into_iter()))
    }

    /// True when every filter matches the span
    pub fn matches_all(&self, span: &Span) -> Result<bool, FilterError> {
        for filter in &self.filters {
            if !filter.matches(span)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl FromIterator<Filter> for FilterSet {
    fn from_iter<T: IntoIterator<Item = Filter>>(iter: T) -> Self {
        let mut set = Self::new();
        for filter in iter {
            set.insert(filter);
        }
        set
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}
