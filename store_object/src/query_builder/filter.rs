//! Equality filters
//!
//! Conditions in a query are combined with AND.

use serde_json::Value;

/// Single `field = value` condition
#[derive(Debug, Clone, PartialEq)]
pub struct QueryFilter {
    pub field: String,
    pub value: Value,
}

impl QueryFilter {
    /// Equal condition
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Self {
            field: field.to_string(),
            value: value.into(),
        }
    }

    /// Whether a serialized record satisfies this condition.
    ///
    /// Missing fields never match.
    pub fn matches(&self, record: &Value) -> bool {
        record
            .get(&self.field)
            .is_some_and(|candidate| candidate == &self.value)
    }
}
