use std::fmt;

use serde::Serialize;
use serde_json::Value;

mod field;
mod nested;

pub use field::*;
pub use nested::*;

/// A sort key in the request tree.
///
/// Renders a single-entry `field → specification` object, one element of the
/// request's `sort` array.
pub trait Sort: fmt::Debug + Send + Sync {
    /// Renders the sort key as a JSON value.
    fn to_value(&self) -> Value;
}

/// The sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// An ordered sequence of sort keys.
///
/// Position is meaning: the first entry is the primary sort key, the second
/// breaks its ties, and so on. Entries are never reordered or deduplicated.
#[derive(Debug, Default)]
pub struct SortCollection {
    sorts: Vec<Box<dyn Sort>>,
}

impl SortCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sort key.
    pub fn add(mut self, sort: impl Sort + 'static) -> Self {
        self.push(Box::new(sort));
        self
    }

    /// Appends a boxed sort key.
    pub fn push(&mut self, sort: Box<dyn Sort>) {
        self.sorts.push(sort);
    }

    pub fn is_empty(&self) -> bool {
        self.sorts.is_empty()
    }

    /// Renders the sort keys as an array, in insertion order.
    pub fn to_value(&self) -> Value {
        Value::Array(self.sorts.iter().map(|sort| sort.to_value()).collect())
    }
}
