//! Data layer: telemetry record shapes

pub mod types;

pub use types::{Attributes, LogEntry, Severity, Span, SpanKind, SpanStatus, UnknownSeverity};
