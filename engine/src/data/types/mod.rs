//! Record types shared by ingestion and filtering

mod attributes;
mod records;
mod severity;

pub use attributes::Attributes;
pub use records::{LogEntry, Span, SpanKind, SpanStatus};
pub use severity::{Severity, UnknownSeverity};
