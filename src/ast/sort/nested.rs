use serde_json::{Map, Value, json};

use super::{Sort, SortOrder};
use crate::ast::Query;

/// A sort key over a field inside a nested object, optionally restricted by
/// a filter query scoped to the nested path.
///
/// ```rust
/// use serde_json::json;
/// use trawl::ast::{NestedSort, Sort, SortOrder, TermQuery};
///
/// let sort = NestedSort::new("offers.price", "offers")
///     .order(SortOrder::Asc)
///     .filter(TermQuery::new("offers.active", true));
///
/// assert_eq!(
///     sort.to_value(),
///     json!({
///         "offers.price": {
///             "nested": {
///                 "path": "offers",
///                 "filter": { "term": { "offers.active": true } },
///             },
///             "order": "asc",
///         }
///     })
/// );
/// ```
#[derive(Debug)]
pub struct NestedSort {
    field: String,
    path: String,
    order: SortOrder,
    filter: Option<Box<dyn Query>>,
}

impl NestedSort {
    pub fn new(field: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            path: path.into(),
            order: SortOrder::Desc,
            filter: None,
        }
    }

    /// Overrides the default descending direction.
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Restricts the nested documents considered for the sort value.
    pub fn filter(mut self, filter: impl Query + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }
}

impl Sort for NestedSort {
    fn to_value(&self) -> Value {
        let mut nested = Map::new();
        nested.insert("path".to_owned(), Value::String(self.path.clone()));

        if let Some(filter) = &self.filter {
            match filter.to_value() {
                Value::Null => {}
                Value::Object(rendered) if rendered.is_empty() => {}
                rendered => {
                    nested.insert("filter".to_owned(), rendered);
                }
            }
        }

        let mut entry = Map::new();
        entry.insert(
            self.field.clone(),
            json!({ "nested": nested, "order": self.order }),
        );

        Value::Object(entry)
    }
}
