use serde_json::{Map, Value, json};

use super::Query;

/// A `match` query: analyzed full-text match against a field.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchQuery {
    field: String,
    query: Value,
}

impl MatchQuery {
    pub fn new(field: impl Into<String>, query: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            query: query.into(),
        }
    }
}

impl Query for MatchQuery {
    fn to_value(&self) -> Value {
        let mut inner = Map::new();
        inner.insert(self.field.clone(), self.query.clone());

        json!({ "match": inner })
    }
}
