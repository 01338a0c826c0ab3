use std::fmt;

use indexmap::IndexMap;
use serde_json::{Map, Value};

mod average;
mod max;
mod terms;

pub use average::*;
pub use max::*;
pub use terms::*;

/// An aggregation definition in the request tree.
///
/// Renders the definition body Elasticsearch expects under the aggregation's
/// name, e.g. `{"avg": {"field": "price"}}`. Bucket variants may embed
/// sub-aggregations, forming a nested tree through this same trait.
pub trait Aggregation: fmt::Debug + Send + Sync {
    /// Renders the definition as a JSON value.
    fn to_value(&self) -> Value;
}

/// An ordered name → definition set of aggregations.
///
/// Names are the keys of the rendered `aggs` object, so the cluster treats
/// them as unique; adding a definition under a name that is already present
/// replaces the definition but keeps the name's original position.
#[derive(Debug, Default)]
pub struct AggregationCollection {
    entries: IndexMap<String, Box<dyn Aggregation>>,
}

impl AggregationCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an aggregation under the given name.
    pub fn add(mut self, name: impl Into<String>, aggregation: impl Aggregation + 'static) -> Self {
        self.insert(name, Box::new(aggregation));
        self
    }

    /// Adds a boxed aggregation under the given name.
    pub fn insert(&mut self, name: impl Into<String>, aggregation: Box<dyn Aggregation>) {
        self.entries.insert(name.into(), aggregation);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the name → definition object in insertion order.
    pub fn to_value(&self) -> Value {
        let entries: Map<String, Value> = self
            .entries
            .iter()
            .map(|(name, aggregation)| (name.clone(), aggregation.to_value()))
            .collect();

        Value::Object(entries)
    }
}
