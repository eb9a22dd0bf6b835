//! Log severity levels
//!
//! Severity is an ordered enum compared by ordinal. Level names are parsed
//! case-insensitively and shared with ingestion, so the ordinals stay
//! consistent end to end. Ingestion additionally accepts the OTLP short names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ordered log severity
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Severity {
    Trace,
    Debug,
    #[default]
    Information,
    Warning,
    Error,
    Critical,
    None,
}

/// Returned when a severity name is not one of the known levels
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown severity level: {0}")]
pub struct UnknownSeverity(pub String);

impl Severity {
    pub const ALL: [Severity; 7] = [
        Self::Trace,
        Self::Debug,
        Self::Information,
        Self::Warning,
        Self::Error,
        Self::Critical,
        Self::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "Trace",
            Self::Debug => "Debug",
            Self::Information => "Information",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Critical => "Critical",
            Self::None => "None",
        }
    }

    /// Parse one of the closed set of level names, ignoring case.
    ///
    /// No aliases and no trimming: this is what filter literals are checked against.
    pub fn from_level_name(name: &str) -> Result<Self, UnknownSeverity> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownSeverity(name.to_string()))
    }

    /// Numeric ordinal used by ordering comparisons
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// Map an OTLP `severity_number` (1..=24) onto a level.
    ///
    /// Returns `None` for `SEVERITY_NUMBER_UNSPECIFIED` (0) and out-of-range values.
    pub fn from_otlp_number(number: i32) -> Option<Self> {
        match number {
            1..=4 => Some(Self::Trace),
            5..=8 => Some(Self::Debug),
            9..=12 => Some(Self::Information),
            13..=16 => Some(Self::Warning),
            17..=20 => Some(Self::Error),
            21..=24 => Some(Self::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = UnknownSeverity;

    /// Lenient parse for ingested records: trims and accepts OTLP short names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if let Ok(level) = Self::from_level_name(name) {
            return Ok(level);
        }
        // OTLP short names
        match name.to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Information),
            "warn" => Ok(Self::Warning),
            "fatal" => Ok(Self::Critical),
            _ => Err(UnknownSeverity(s.to_string())),
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = UnknownSeverity;

    fn try_from(value: String) -> Result<Self, UnknownSeverity> {
        value.parse()
    }
}

impl From<Severity> for &'static str {
    fn from(severity: Severity) -> Self {
        severity.as_str()
    }
}
