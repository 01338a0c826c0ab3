use serde_json::{Map, Value, json};

use super::Query;

/// A `term` query: exact match of a single value against a field.
#[derive(Debug, Clone, PartialEq)]
pub struct TermQuery {
    field: String,
    value: Value,
}

impl TermQuery {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl Query for TermQuery {
    fn to_value(&self) -> Value {
        let mut term = Map::new();
        term.insert(self.field.clone(), self.value.clone());

        json!({ "term": term })
    }
}
