//! Telemetry filter engine
//!
//! Evaluates `{field, condition, value}` filters against log entries and spans.
//!
//! ## Usage
//!
//! ```no_run
//! use sideseat_filter::domain::filter::{FilterLimits, FilterSet, RecordShape, parse_filters};
//! # let entries: Vec<sideseat_filter::data::LogEntry> = Vec::new();
//!
//! let json = r#"[{"field": "Severity", "condition": ">=", "value": "Warning"}]"#;
//! let filters: FilterSet = parse_filters(json, &FilterLimits::default(), RecordShape::Logs)
//!     .unwrap()
//!     .into_iter()
//!     .collect();
//! for entry in filters.apply_all(&entries).unwrap() {
//!     println!("{}", entry.message);
//! }
//! ```

mod condition;
mod display;
mod error;
mod eval;
mod field;
mod parser;
mod set;
mod types;

pub use condition::{OrderingComparator, StringComparator, ordering_comparator, string_comparator};
pub use display::{ConditionLabels, InvariantLabels};
pub use error::FilterError;
pub use eval::{FilteredLogs, LogPredicate};
pub use field::{
    FieldRef, FieldValue, LogField, LogFieldRef, RecordShape, SpanField, SpanFieldRef,
    display_name, resolve_log, resolve_span,
};
pub use parser::{FilterLimits, parse_filters};
pub use set::FilterSet;
pub use types::{Filter, FilterCondition, ValueDomain};
