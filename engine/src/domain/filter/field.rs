//! Field resolution
//!
//! Two tiers: a closed set of fixed fields per record shape, then the record's
//! attribute bag by exact name. Fixed fields always win over same-named
//! attributes. Identifiers are case-sensitive with no aliasing.

use chrono::{DateTime, Utc};

use crate::data::types::{LogEntry, Severity, Span};

use super::types::ValueDomain;

/// Fixed log entry fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogField {
    Timestamp,
    Severity,
    Message,
    OriginalFormat,
    TraceId,
    SpanId,
    Category,
    Application,
}

impl LogField {
    pub const ALL: [LogField; 8] = [
        Self::Timestamp,
        Self::Severity,
        Self::Message,
        Self::OriginalFormat,
        Self::TraceId,
        Self::SpanId,
        Self::Category,
        Self::Application,
    ];

    /// Identifier used in filters
    pub fn name(&self) -> &'static str {
        match self {
            Self::Timestamp => "TimeStamp",
            Self::Severity => "Severity",
            Self::Message => "Message",
            Self::OriginalFormat => "OriginalFormat",
            Self::TraceId => "TraceId",
            Self::SpanId => "SpanId",
            Self::Category => "Category",
            Self::Application => "Application",
        }
    }

    /// Presentation name, never used for resolution
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Timestamp => "Timestamp",
            Self::Severity => "Level",
            Self::Message => "Message",
            Self::OriginalFormat => "Format",
            Self::TraceId => "Trace",
            Self::SpanId => "Span",
            Self::Category => "Category",
            Self::Application => "Application",
        }
    }

    /// Value domain the field's literal is interpreted in
    pub fn domain(&self) -> ValueDomain {
        match self {
            Self::Timestamp => ValueDomain::Date,
            Self::Severity => ValueDomain::Number,
            _ => ValueDomain::String,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// Fixed span fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanField {
    TraceId,
    SpanId,
    Name,
    Kind,
    Status,
    Application,
    Source,
}

impl SpanField {
    pub const ALL: [SpanField; 7] = [
        Self::TraceId,
        Self::SpanId,
        Self::Name,
        Self::Kind,
        Self::Status,
        Self::Application,
        Self::Source,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::TraceId => "TraceId",
            Self::SpanId => "SpanId",
            Self::Name => "Name",
            Self::Kind => "Kind",
            Self::Status => "Status",
            Self::Application => "Application",
            Self::Source => "Source",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::TraceId => "Trace",
            Self::SpanId => "Span",
            Self::Name => "Name",
            Self::Kind => "Kind",
            Self::Status => "Status",
            Self::Application => "Application",
            Self::Source => "Source",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// Record shape a filter is evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    Logs,
    Spans,
}

impl RecordShape {
    /// Value domain `field` is compared in for this shape.
    ///
    /// Every span field, fixed or attribute, is compared as text.
    pub fn domain(&self, field: &str) -> ValueDomain {
        match self {
            Self::Logs => LogFieldRef::parse(field).domain(),
            Self::Spans => ValueDomain::String,
        }
    }
}

/// A filter field as seen by one record shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef<'a, F> {
    Fixed(F),
    Attribute(&'a str),
}

pub type LogFieldRef<'a> = FieldRef<'a, LogField>;
pub type SpanFieldRef<'a> = FieldRef<'a, SpanField>;

impl<'a> LogFieldRef<'a> {
    pub fn parse(name: &'a str) -> Self {
        LogField::from_name(name).map_or(Self::Attribute(name), Self::Fixed)
    }

    pub fn domain(&self) -> ValueDomain {
        match self {
            Self::Fixed(field) => field.domain(),
            Self::Attribute(_) => ValueDomain::String,
        }
    }
}

impl<'a> SpanFieldRef<'a> {
    pub fn parse(name: &'a str) -> Self {
        SpanField::from_name(name).map_or(Self::Attribute(name), Self::Fixed)
    }
}

/// Resolved field value in its native representation
///
/// `Attribute(None)` and `Text(None)` are "no value", distinct from an empty string.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'r> {
    Timestamp(DateTime<Utc>),
    Severity(Severity),
    Text(Option<&'r str>),
    Attribute(Option<&'r str>),
}

impl<'r> FieldValue<'r> {
    /// Text for string comparison; `None` when absent or not text-valued
    pub fn text(&self) -> Option<&'r str> {
        match self {
            Self::Text(text) | Self::Attribute(text) => *text,
            Self::Timestamp(_) | Self::Severity(_) => None,
        }
    }
}

/// Resolve a field on a log entry
pub fn resolve_log<'r>(field: LogFieldRef<'_>, entry: &'r LogEntry) -> FieldValue<'r> {
    match field {
        FieldRef::Fixed(fixed) => match fixed {
            LogField::Timestamp => FieldValue::Timestamp(entry.timestamp),
            LogField::Severity => FieldValue::Severity(entry.severity),
            LogField::Message => FieldValue::Text(Some(entry.message.as_str())),
            LogField::OriginalFormat => FieldValue::Text(entry.original_format.as_deref()),
            LogField::TraceId => FieldValue::Text(Some(entry.trace_id.as_str())),
            LogField::SpanId => FieldValue::Text(Some(entry.span_id.as_str())),
            LogField::Category => FieldValue::Text(Some(entry.scope_name.as_str())),
            LogField::Application => FieldValue::Text(Some(entry.application_name.as_str())),
        },
        FieldRef::Attribute(name) => FieldValue::Attribute(entry.attribute(name)),
    }
}

/// Resolve a field on a span
pub fn resolve_span<'r>(field: SpanFieldRef<'_>, span: &'r Span) -> FieldValue<'r> {
    match field {
        FieldRef::Fixed(fixed) => match fixed {
            SpanField::TraceId => FieldValue::Text(Some(span.trace_id.as_str())),
            SpanField::SpanId => FieldValue::Text(Some(span.span_id.as_str())),
            SpanField::Name => FieldValue::Text(Some(span.name.as_str())),
            SpanField::Kind => FieldValue::Text(Some(span.kind.as_str())),
            SpanField::Status => FieldValue::Text(Some(span.status.as_str())),
            SpanField::Application => FieldValue::Text(Some(span.application_name.as_str())),
            SpanField::Source => FieldValue::Text(Some(span.scope_name.as_str())),
        },
        FieldRef::Attribute(name) => FieldValue::Attribute(span.attribute(name)),
    }
}

/// Presentation name for a log or span field identifier, falling back to the raw name
pub fn display_name(field: &str) -> &str {
    match LogFieldRef::parse(field) {
        FieldRef::Fixed(fixed) => fixed.display_name(),
        FieldRef::Attribute(_) => match SpanField::from_name(field) {
            Some(fixed) => fixed.display_name(),
            None => field,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::TimeZone;

    use super::*;
    use crate::data::types::{SpanKind, SpanStatus};

    fn entry() -> LogEntry {
        LogEntry {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            severity: Severity::Error,
            message: "boom".to_string(),
            original_format: None,
            trace_id: "trace-1".to_string(),
            span_id: "span-1".to_string(),
            application_name: "api".to_string(),
            scope_name: "app.db".to_string(),
            attributes: HashMap::from([
                ("Message".to_string(), "from-attrs".to_string()),
                ("http.status_code".to_string(), "503".to_string()),
            ]),
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(LogFieldRef::parse("Message"), FieldRef::Fixed(LogField::Message));
        assert_eq!(LogFieldRef::parse("message"), FieldRef::Attribute("message"));
        assert_eq!(SpanFieldRef::parse("Kind"), FieldRef::Fixed(SpanField::Kind));
        assert_eq!(SpanFieldRef::parse("kind"), FieldRef::Attribute("kind"));
    }

    #[test]
    fn display_names_do_not_resolve() {
        // "Level" is presentation only
        assert_eq!(LogFieldRef::parse("Level"), FieldRef::Attribute("Level"));
        assert_eq!(display_name("Severity"), "Level");
        assert_eq!(display_name("Source"), "Source");
        assert_eq!(display_name("http.route"), "http.route");
    }

    #[test]
    fn fixed_field_wins_over_attribute() {
        let e = entry();
        let value = resolve_log(LogFieldRef::parse("Message"), &e);
        assert_eq!(value, FieldValue::Text(Some("boom")));
    }

    #[test]
    fn attribute_fallback() {
        let e = entry();
        let value = resolve_log(LogFieldRef::parse("http.status_code"), &e);
        assert_eq!(value.text(), Some("503"));
        let missing = resolve_log(LogFieldRef::parse("http.method"), &e);
        assert_eq!(missing, FieldValue::Attribute(None));
        assert_eq!(missing.text(), None);
    }

    #[test]
    fn absent_original_format_is_no_value() {
        let e = entry();
        let value = resolve_log(LogFieldRef::parse("OriginalFormat"), &e);
        assert_eq!(value.text(), None);
    }

    #[test]
    fn typed_fields_resolve_natively() {
        let e = entry();
        let severity = resolve_log(LogFieldRef::parse("Severity"), &e);
        assert_eq!(severity, FieldValue::Severity(Severity::Error));
        assert_eq!(severity.text(), None);
        assert_eq!(
            resolve_log(LogFieldRef::parse("TimeStamp"), &e),
            FieldValue::Timestamp(e.timestamp)
        );
    }

    #[test]
    fn span_shape_compares_everything_as_text() {
        assert_eq!(RecordShape::Logs.domain("Severity"), ValueDomain::Number);
        assert_eq!(RecordShape::Logs.domain("TimeStamp"), ValueDomain::Date);
        assert_eq!(RecordShape::Logs.domain("http.route"), ValueDomain::String);
        assert_eq!(RecordShape::Spans.domain("Severity"), ValueDomain::String);
        assert_eq!(RecordShape::Spans.domain("TimeStamp"), ValueDomain::String);
        assert_eq!(RecordShape::Spans.domain("Kind"), ValueDomain::String);
    }

    #[test]
    fn span_fields_resolve() {
        let span = Span {
            trace_id: "t".to_string(),
            span_id: "s".to_string(),
            name: "GET /users".to_string(),
            kind: SpanKind::Client,
            status: SpanStatus::Error,
            application_name: "web".to_string(),
            scope_name: "reqwest".to_string(),
            attributes: HashMap::new(),
        };
        let kind = resolve_span(SpanFieldRef::parse("Kind"), &span);
        assert_eq!(kind.text(), Some("Client"));
        let source = resolve_span(SpanFieldRef::parse("Source"), &span);
        assert_eq!(source.text(), Some("reqwest"));
        let missing = resolve_span(SpanFieldRef::parse("db.system"), &span);
        assert_eq!(missing.text(), None);
    }
}
