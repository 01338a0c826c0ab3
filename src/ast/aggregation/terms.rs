use serde_json::{Map, Value, json};

use super::{Aggregation, AggregationCollection};

/// A `terms` bucket aggregation: one bucket per distinct value of a field.
///
/// Buckets can carry sub-aggregations, computed over the documents that fell
/// into each bucket.
///
/// ```rust
/// use serde_json::json;
/// use trawl::ast::{Aggregation, AverageAggregation, TermsAggregation};
///
/// let aggregation = TermsAggregation::new("color")
///     .size(10)
///     .aggregation("avg_price", AverageAggregation::new("price"));
///
/// assert_eq!(
///     aggregation.to_value(),
///     json!({
///         "terms": { "field": "color", "size": 10 },
///         "aggs": { "avg_price": { "avg": { "field": "price" } } },
///     })
/// );
/// ```
#[derive(Debug, Default)]
pub struct TermsAggregation {
    field: String,
    size: Option<u64>,
    sub_aggregations: AggregationCollection,
}

impl TermsAggregation {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Default::default()
        }
    }

    /// The number of buckets to return.
    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Adds a named sub-aggregation, computed per bucket.
    pub fn aggregation(
        mut self,
        name: impl Into<String>,
        aggregation: impl Aggregation + 'static,
    ) -> Self {
        self.sub_aggregations.insert(name, Box::new(aggregation));
        self
    }
}

impl Aggregation for TermsAggregation {
    fn to_value(&self) -> Value {
        let mut terms = Map::new();
        terms.insert("field".to_owned(), Value::String(self.field.clone()));

        if let Some(size) = self.size {
            terms.insert("size".to_owned(), json!(size));
        }

        let mut definition = Map::new();
        definition.insert("terms".to_owned(), Value::Object(terms));

        if !self.sub_aggregations.is_empty() {
            definition.insert("aggs".to_owned(), self.sub_aggregations.to_value());
        }

        Value::Object(definition)
    }
}
