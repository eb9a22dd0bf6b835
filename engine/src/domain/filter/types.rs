//! Filter type definitions
//!
//! A filter is a field identifier, a condition and the raw literal as entered.
//! How the literal is interpreted is decided per field at evaluation time.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::utils::string::{eq_ignore_case, fold_case};

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterCondition {
    #[serde(rename = "=")]
    Equals,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "not contains")]
    NotContains,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
    #[serde(rename = "<=")]
    LessThanOrEqual,
}

impl FilterCondition {
    pub const ALL: [FilterCondition; 8] = [
        Self::Equals,
        Self::NotEqual,
        Self::Contains,
        Self::NotContains,
        Self::GreaterThan,
        Self::LessThan,
        Self::GreaterThanOrEqual,
        Self::LessThanOrEqual,
    ];

    /// Wire symbol, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::NotEqual => "!=",
            Self::Contains => "contains",
            Self::NotContains => "not contains",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThanOrEqual => "<=",
        }
    }
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value domain a field is compared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueDomain {
    String,
    Number,
    Date,
}

impl ValueDomain {
    /// Whether `condition` has a defined comparator in this domain
    pub fn supports(&self, condition: FilterCondition) -> bool {
        use FilterCondition::*;
        match self {
            Self::String => matches!(condition, Equals | NotEqual | Contains | NotContains),
            Self::Number | Self::Date => !matches!(condition, Contains | NotContains),
        }
    }

    /// Conditions a filter editor should offer for this domain
    pub fn supported_conditions(&self) -> Vec<FilterCondition> {
        FilterCondition::ALL
            .into_iter()
            .filter(|c| self.supports(*c))
            .collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for ValueDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `{field, condition, value}` filter
///
/// Equality compares `field` and `condition` exactly and `value`
/// case-insensitively. `Hash` folds the value the same way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub condition: FilterCondition,
    pub value: String,
}

impl Filter {
    pub fn new(
        field: impl Into<String>,
        condition: FilterCondition,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            condition,
            value: value.into(),
        }
    }
}

impl PartialEq for Filter {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field
            && self.condition == other.condition
            && eq_ignore_case(&self.value, &other.value)
    }
}

impl Eq for Filter {}

impl Hash for Filter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.field.hash(state);
        self.condition.hash(state);
        fold_case(&self.value).hash(state);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn equality_ignores_value_case_only() {
        let a = Filter::new("Message", FilterCondition::Equals, "Timeout");
        let b = Filter::new("Message", FilterCondition::Equals, "TIMEOUT");
        let other_field = Filter::new("message", FilterCondition::Equals, "Timeout");
        let other_condition = Filter::new("Message", FilterCondition::NotEqual, "Timeout");

        assert_eq!(a, b);
        assert_ne!(a, other_field);
        assert_ne!(a, other_condition);
    }

    #[test]
    fn hash_agrees_with_equality() {
        let mut set = HashSet::new();
        assert!(set.insert(Filter::new("Message", FilterCondition::Contains, "Ошибка")));
        assert!(!set.insert(Filter::new("Message", FilterCondition::Contains, "ОШИБКА")));
        assert!(set.insert(Filter::new("Message", FilterCondition::NotContains, "ошибка")));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn condition_serde_uses_symbols() {
        let json = r#"{"field":"Severity","condition":">=","value":"Warning"}"#;
        let filter: Filter = serde_json::from_str(json).unwrap();
        assert_eq!(filter.condition, FilterCondition::GreaterThanOrEqual);

        for condition in FilterCondition::ALL {
            let encoded = serde_json::to_string(&condition).unwrap();
            assert_eq!(encoded, format!("\"{}\"", condition.as_str()));
        }
    }

    #[test]
    fn domain_support_matrix() {
        assert_eq!(
            ValueDomain::String.supported_conditions(),
            vec![
                FilterCondition::Equals,
                FilterCondition::NotEqual,
                FilterCondition::Contains,
                FilterCondition::NotContains,
            ]
        );
        assert_eq!(ValueDomain::Number.supported_conditions().len(), 6);
        assert!(!ValueDomain::Date.supports(FilterCondition::Contains));
        assert!(ValueDomain::Date.supports(FilterCondition::LessThanOrEqual));
    }
}
