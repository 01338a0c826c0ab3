use serde_json::{Value, json};

use super::Aggregation;

/// A single-value metric aggregation computing the maximum of a numeric
/// field.
#[derive(Debug, Clone, PartialEq)]
pub struct MaxAggregation {
    field: String,
}

impl MaxAggregation {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl Aggregation for MaxAggregation {
    fn to_value(&self) -> Value {
        json!({ "max": { "field": self.field } })
    }
}
