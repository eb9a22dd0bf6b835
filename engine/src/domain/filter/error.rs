//! Filter evaluation and parsing errors

use thiserror::Error;

use super::types::{FilterCondition, ValueDomain};

/// Errors raised while building, parsing or evaluating filters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Literal could not be interpreted for a structurally typed field
    #[error("Invalid value '{value}' for field {field}: {reason}")]
    InvalidLiteral {
        field: String,
        value: String,
        reason: String,
    },

    /// Condition is not defined for the field's value domain
    #[error("Condition '{condition}' is not supported for {domain} values")]
    UnsupportedCondition {
        condition: FilterCondition,
        domain: ValueDomain,
    },

    /// Filter JSON could not be deserialized
    #[error("Invalid filter JSON: {0}")]
    InvalidJson(String),

    /// Filter JSON exceeded the configured size limit
    #[error("Filter JSON is {size} bytes, exceeds maximum of {max} bytes")]
    TooLarge { size: usize, max: usize },

    /// More filters than the configured limit
    #[error("{count} filters given, maximum {max} allowed")]
    TooManyFilters { count: usize, max: usize },

    /// Filter with an empty field name
    #[error("Filter field must not be empty")]
    EmptyField,
}
