use serde_json::{Value, json};

use super::Aggregation;

/// A single-value metric aggregation computing the average of a numeric
/// field.
#[derive(Debug, Clone, PartialEq)]
pub struct AverageAggregation {
    field: String,
}

impl AverageAggregation {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl Aggregation for AverageAggregation {
    fn to_value(&self) -> Value {
        json!({ "avg": { "field": self.field } })
    }
}
