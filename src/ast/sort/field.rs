use serde_json::{Map, Value, json};

use super::{Sort, SortOrder};

/// A plain per-field sort key.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSort {
    field: String,
    order: SortOrder,
}

impl FieldSort {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }
}

impl Sort for FieldSort {
    fn to_value(&self) -> Value {
        let mut entry = Map::new();
        entry.insert(self.field.clone(), json!({ "order": self.order }));

        Value::Object(entry)
    }
}
