use serde_json::{Value, json};

use super::Query;

/// An `exists` query: matches documents holding any value for the field.
#[derive(Debug, Clone, PartialEq)]
pub struct ExistsQuery {
    field: String,
}

impl ExistsQuery {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl Query for ExistsQuery {
    fn to_value(&self) -> Value {
        json!({ "exists": { "field": self.field } })
    }
}
