use std::fmt;

use serde_json::Value;

/// A query clause in the request tree.
///
/// Every variant renders itself into the JSON fragment Elasticsearch expects
/// for it. Rendering is pure: it reads the node, never mutates it, and yields
/// the same value every time. Composite variants render by recursing into
/// their children through this same trait.
pub trait Query: fmt::Debug + Send + Sync {
    /// Renders the clause as a JSON value.
    fn to_value(&self) -> Value;
}

impl Query for Box<dyn Query> {
    fn to_value(&self) -> Value {
        self.as_ref().to_value()
    }
}
