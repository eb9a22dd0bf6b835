//! Filter evaluation
//!
//! A filter is compiled once into a [`LogPredicate`] and then run against any
//! number of entries. Literal parsing happens at compile time, so a malformed
//! timestamp fails before a single record is read.
//!
//! ## Dispatch
//!
//! | Field       | Literal parsed as | Comparator | Parse failure |
//! |-------------|-------------------|------------|---------------|
//! | `TimeStamp` | date/time         | date       | `InvalidLiteral` error |
//! | `Severity`  | severity level    | number     | pass-through (every entry matches) |
//! | `Message`   | text              | string     | n/a |
//! | other       | text              | string     | n/a |
//!
//! The severity fallback is permissive while the timestamp one is fatal. The
//! asymmetry is intentional: changing either changes what users see.

use std::borrow::Borrow;
use std::iter::FusedIterator;

use chrono::{DateTime, Utc};

use crate::data::types::{LogEntry, Severity, Span};
use crate::utils::time::parse_timestamp_literal;

use super::condition::{
    OrderingComparator, StringComparator, ordering_comparator, string_comparator,
};
use super::error::FilterError;
use super::field::{LogField, LogFieldRef, RecordShape, SpanFieldRef, resolve_log, resolve_span};
use super::types::{Filter, ValueDomain};

/// Compiled log filter
#[derive(Debug, Clone)]
pub enum LogPredicate<'f> {
    /// Literal was not a severity level; matches everything
    PassThrough,
    Timestamp {
        cmp: OrderingComparator<DateTime<Utc>>,
        literal: DateTime<Utc>,
    },
    Severity {
        cmp: OrderingComparator<u8>,
        level: Severity,
    },
    Message {
        cmp: StringComparator,
        literal: &'f str,
    },
    Field {
        field: LogFieldRef<'f>,
        cmp: StringComparator,
        literal: &'f str,
    },
}

impl LogPredicate<'_> {
    pub fn matches(&self, entry: &LogEntry) -> bool {
        match self {
            Self::PassThrough => true,
            Self::Timestamp { cmp, literal } => cmp(&entry.timestamp, literal),
            Self::Severity { cmp, level } => cmp(&entry.severity.ordinal(), &level.ordinal()),
            Self::Message { cmp, literal } => cmp(Some(entry.message.as_str()), *literal),
            Self::Field {
                field,
                cmp,
                literal,
            } => {
                let value = resolve_log(*field, entry);
                cmp(value.text(), *literal)
            }
        }
    }
}

impl Filter {
    /// Compile this filter for log entries
    pub fn compile_log(&self) -> Result<LogPredicate<'_>, FilterError> {
        let field = LogFieldRef::parse(&self.field);
        let predicate = match field {
            LogFieldRef::Fixed(LogField::Timestamp) => {
                let cmp = ordering_comparator(self.condition, ValueDomain::Date)?;
                let literal = parse_timestamp_literal(&self.value).map_err(|e| {
                    FilterError::InvalidLiteral {
                        field: self.field.clone(),
                        value: self.value.clone(),
                        reason: e.to_string(),
                    }
                })?;
                LogPredicate::Timestamp { cmp, literal }
            }
            LogFieldRef::Fixed(LogField::Severity) => match Severity::from_level_name(&self.value) {
                Ok(level) => LogPredicate::Severity {
                    cmp: ordering_comparator(self.condition, ValueDomain::Number)?,
                    level,
                },
                Err(e) => {
                    tracing::debug!(
                        field = %self.field,
                        error = %e,
                        "Severity literal not recognized, filter passes all entries"
                    );
                    LogPredicate::PassThrough
                }
            },
            LogFieldRef::Fixed(LogField::Message) => LogPredicate::Message {
                cmp: string_comparator(self.condition)?,
                literal: &self.value,
            },
            field => LogPredicate::Field {
                field,
                cmp: string_comparator(self.condition)?,
                literal: &self.value,
            },
        };
        tracing::trace!(filter = ?self, predicate = ?predicate, "Compiled log filter");
        Ok(predicate)
    }

    /// Lazily filter log entries, preserving order.
    ///
    /// Accepts owned entries or references. The literal is validated up front;
    /// records are only evaluated as the returned iterator is consumed.
    pub fn apply<I>(&self, entries: I) -> Result<FilteredLogs<'_, I::IntoIter>, FilterError>
    where
        I: IntoIterator,
        I::Item: Borrow<LogEntry>,
    {
        Ok(FilteredLogs::new(vec![self.compile_log()?], entries.into_iter()))
    }

    /// Evaluate this filter against one log entry
    pub fn matches_log(&self, entry: &LogEntry) -> Result<bool, FilterError> {
        Ok(self.compile_log()?.matches(entry))
    }

    /// Evaluate this filter against one span.
    ///
    /// Every span field is compared as text.
    pub fn matches(&self, span: &Span) -> Result<bool, FilterError> {
        let cmp = string_comparator(self.condition)?;
        let value = resolve_span(SpanFieldRef::parse(&self.field), span);
        Ok(cmp(value.text(), &self.value))
    }

    /// Check the condition is allowed for the field on `shape` and the literal is usable.
    ///
    /// An unrecognized severity literal is still valid: it yields a pass-through filter.
    pub fn validate(&self, shape: RecordShape) -> Result<(), FilterError> {
        if self.field.is_empty() {
            return Err(FilterError::EmptyField);
        }
        let domain = shape.domain(&self.field);
        if !domain.supports(self.condition) {
            return Err(FilterError::UnsupportedCondition {
                condition: self.condition,
                domain,
            });
        }
        match shape {
            RecordShape::Logs => self.compile_log().map(|_| ()),
            RecordShape::Spans => Ok(()),
        }
    }
}

/// Lazy, single-pass iterator over entries accepted by every predicate
#[derive(Debug)]
pub struct FilteredLogs<'f, I> {
    predicates: Vec<LogPredicate<'f>>,
    inner: I,
}

impl<'f, I> FilteredLogs<'f, I> {
    pub(crate) fn new(predicates: Vec<LogPredicate<'f>>, inner: I) -> Self {
        Self { predicates, inner }
    }
}

impl<I> Iterator for FilteredLogs<'_, I>
where
    I: Iterator,
    I::Item: Borrow<LogEntry>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let predicates = &self.predicates;
        self.inner
            .find(|item| predicates.iter().all(|p| p.matches(item.borrow())))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl<I> FusedIterator for FilteredLogs<'_, I>
where
    I: FusedIterator,
    I::Item: Borrow<LogEntry>,
{
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod tests;
