//! Filter parsing
//!
//! Reads structured filter definitions from JSON with size, count and
//! per-filter validation.

use crate::core::constants::{DEFAULT_MAX_FILTERS, DEFAULT_MAX_FILTER_JSON_BYTES};

use super::error::FilterError;
use super::field::RecordShape;
use super::types::Filter;

/// Limits applied when parsing filter JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterLimits {
    pub max_filters: usize,
    pub max_json_bytes: usize,
}

impl Default for FilterLimits {
    fn default() -> Self {
        Self {
            max_filters: DEFAULT_MAX_FILTERS,
            max_json_bytes: DEFAULT_MAX_FILTER_JSON_BYTES,
        }
    }
}

/// Parse a JSON array of `{field, condition, value}` filters
///
/// Validates JSON size, parses into Filter structs, and validates each filter
/// against its field's value domain on `shape`.
pub fn parse_filters(
    json_str: &str,
    limits: &FilterLimits,
    shape: RecordShape,
) -> Result<Vec<Filter>, FilterError> {
    if json_str.len() > limits.max_json_bytes {
        return Err(FilterError::TooLarge {
            size: json_str.len(),
            max: limits.max_json_bytes,
        });
    }

    let filters: Vec<Filter> =
        serde_json::from_str(json_str).map_err(|e| FilterError::InvalidJson(e.to_string()))?;

    if filters.len() > limits.max_filters {
        return Err(FilterError::TooManyFilters {
            count: filters.len(),
            max: limits.max_filters,
        });
    }

    for filter in &filters {
        filter.validate(shape)?;
    }

    tracing::debug!(count = filters.len(), shape = ?shape, "Parsed filters");
    Ok(filters)
}
