//! Telemetry record shapes consumed by filters
//!
//! These are read-only views produced by the ingestion pipeline. Filters never
//! mutate them.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::time::nanos_to_datetime;

use super::attributes::Attributes;
use super::severity::Severity;

/// Structured log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_format: Option<String>,
    #[serde(default)]
    pub trace_id: String,
    #[serde(default)]
    pub span_id: String,
    #[serde(default)]
    pub application_name: String,
    #[serde(default)]
    pub scope_name: String,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl LogEntry {
    /// Attribute bag lookup by exact name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        Attributes::get(&self.attributes, name)
    }
}

/// Timestamps arrive either as RFC 3339 text or as OTLP `time_unix_nano`
#[derive(Deserialize)]
#[serde(untagged)]
enum TimestampRepr {
    Nanos(u64),
    Text(DateTime<Utc>),
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TimestampRepr::deserialize(deserializer)? {
        TimestampRepr::Nanos(nanos) => nanos_to_datetime(nanos),
        TimestampRepr::Text(dt) => dt,
    })
}

/// OTLP span kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpanKind {
    #[default]
    Unspecified,
    Internal,
    Server,
    Client,
    Producer,
    Consumer,
}

impl SpanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "Unspecified",
            Self::Internal => "Internal",
            Self::Server => "Server",
            Self::Client => "Client",
            Self::Producer => "Producer",
            Self::Consumer => "Consumer",
        }
    }
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OTLP span status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpanStatus {
    #[default]
    Unset,
    Ok,
    Error,
}

impl SpanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "Unset",
            Self::Ok => "Ok",
            Self::Error => "Error",
        }
    }
}

impl fmt::Display for SpanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trace span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub trace_id: String,
    pub span_id: String,
    pub name: String,
    #[serde(default)]
    pub kind: SpanKind,
    #[serde(default)]
    pub status: SpanStatus,
    #[serde(default)]
    pub application_name: String,
    #[serde(default)]
    pub scope_name: String,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl Span {
    /// Attribute bag lookup by exact name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        Attributes::get(&self.attributes, name)
    }
}
