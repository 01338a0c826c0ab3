use serde_json::{Map, Value, json};

use super::Query;

/// A `range` query over a single field.
///
/// Only the bounds that were set end up in the rendered output.
///
/// ```rust
/// use serde_json::json;
/// use trawl::ast::{Query, RangeQuery};
///
/// let query = RangeQuery::new("year").gte(2020).lt(2024);
///
/// assert_eq!(
///     query.to_value(),
///     json!({ "range": { "year": { "gte": 2020, "lt": 2024 } } })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RangeQuery {
    field: String,
    gte: Option<Value>,
    gt: Option<Value>,
    lte: Option<Value>,
    lt: Option<Value>,
}

impl RangeQuery {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Default::default()
        }
    }

    /// Greater than or equal to.
    pub fn gte(mut self, value: impl Into<Value>) -> Self {
        self.gte = Some(value.into());
        self
    }

    /// Greater than.
    pub fn gt(mut self, value: impl Into<Value>) -> Self {
        self.gt = Some(value.into());
        self
    }

    /// Less than or equal to.
    pub fn lte(mut self, value: impl Into<Value>) -> Self {
        self.lte = Some(value.into());
        self
    }

    /// Less than.
    pub fn lt(mut self, value: impl Into<Value>) -> Self {
        self.lt = Some(value.into());
        self
    }
}

impl Query for RangeQuery {
    fn to_value(&self) -> Value {
        let bounds = [
            ("gte", &self.gte),
            ("gt", &self.gt),
            ("lte", &self.lte),
            ("lt", &self.lt),
        ];

        let mut range = Map::new();
        for (key, bound) in bounds {
            if let Some(value) = bound {
                range.insert(key.to_owned(), value.clone());
            }
        }

        let mut inner = Map::new();
        inner.insert(self.field.clone(), Value::Object(range));

        json!({ "range": inner })
    }
}
