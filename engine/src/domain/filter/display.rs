//! Presentation text for filters
//!
//! Display strings never feed back into evaluation. Localization is supplied
//! by the caller through [`ConditionLabels`].

use std::borrow::Cow;

use super::field::display_name;
use super::types::{Filter, FilterCondition};

/// Source of localized condition labels
pub trait ConditionLabels {
    fn label(&self, condition: FilterCondition) -> Cow<'_, str>;
}

/// Locale-invariant symbolic labels
#[derive(Debug, Clone, Copy, Default)]
pub struct InvariantLabels;

impl ConditionLabels for InvariantLabels {
    fn label(&self, condition: FilterCondition) -> Cow<'_, str> {
        Cow::Borrowed(match condition {
            FilterCondition::Equals => "==",
            FilterCondition::NotEqual => "!=",
            FilterCondition::Contains => "contains",
            FilterCondition::NotContains => "not contains",
            FilterCondition::GreaterThan => ">",
            FilterCondition::LessThan => "<",
            FilterCondition::GreaterThanOrEqual => ">=",
            FilterCondition::LessThanOrEqual => "<=",
        })
    }
}

impl Filter {
    /// `"{field} {condition} {value}"` using the field's display name
    pub fn display_text(&self, labels: &dyn ConditionLabels) -> String {
        format!(
            "{} {} {}",
            display_name(&self.field),
            labels.label(self.condition),
            self.value
        )
    }
}
