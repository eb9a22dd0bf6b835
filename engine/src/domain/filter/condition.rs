//! Condition evaluation
//!
//! Maps a condition and value domain to a two-argument comparator. Asking for
//! a combination outside the domain's support matrix is an error, never a
//! silent `false`.

use super::error::FilterError;
use super::types::{FilterCondition, ValueDomain};
use crate::utils::string::{contains_ignore_case, eq_ignore_case};

/// Compares a possibly absent subject against the filter literal
pub type StringComparator = fn(Option<&str>, &str) -> bool;

/// Compares two present values of an ordered domain
pub type OrderingComparator<T> = fn(&T, &T) -> bool;

/// String comparator for `condition`.
///
/// Against an absent subject, `NotEqual` is true and everything else is false.
pub fn string_comparator(condition: FilterCondition) -> Result<StringComparator, FilterError> {
    let cmp: StringComparator = match condition {
        FilterCondition::Equals => |a, b| a.is_some_and(|a| eq_ignore_case(a, b)),
        FilterCondition::NotEqual => |a, b| !a.is_some_and(|a| eq_ignore_case(a, b)),
        FilterCondition::Contains => |a, b| a.is_some_and(|a| contains_ignore_case(a, b)),
        FilterCondition::NotContains => |a, b| a.is_some_and(|a| !contains_ignore_case(a, b)),
        _ => return Err(unsupported(condition, ValueDomain::String)),
    };
    Ok(cmp)
}

/// Number or date comparator for `condition`
pub fn ordering_comparator<T: PartialOrd>(
    condition: FilterCondition,
    domain: ValueDomain,
) -> Result<OrderingComparator<T>, FilterError> {
    if !matches!(domain, ValueDomain::Number | ValueDomain::Date) {
        return Err(unsupported(condition, domain));
    }
    let cmp: OrderingComparator<T> = match condition {
        FilterCondition::Equals => |a, b| a == b,
        FilterCondition::NotEqual => |a, b| a != b,
        FilterCondition::GreaterThan => |a, b| a > b,
        FilterCondition::LessThan => |a, b| a < b,
        FilterCondition::GreaterThanOrEqual => |a, b| a >= b,
        FilterCondition::LessThanOrEqual => |a, b| a <= b,
        FilterCondition::Contains | FilterCondition::NotContains => {
            return Err(unsupported(condition, domain));
        }
    };
    Ok(cmp)
}

fn unsupported(condition: FilterCondition, domain: ValueDomain) -> FilterError {
    tracing::error!(%condition, %domain, "Filter condition not supported for value domain");
    FilterError::UnsupportedCondition { condition, domain }
}
