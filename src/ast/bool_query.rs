use indexmap::IndexMap;
use serde_json::{Map, Value, json};

use super::Query;

/// The boolean occurrence kinds Elasticsearch recognizes for `bool` query
/// clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occur {
    /// The clause must match and contributes to the score.
    Must,
    /// The clause should match; at least one `should` clause has to match
    /// when no `must` or `filter` clause is present.
    Should,
    /// The clause must not match. Never scored.
    MustNot,
    /// The clause must match, without contributing to the score.
    Filter,
}

impl Occur {
    pub fn as_str(&self) -> &'static str {
        match self {
            Occur::Must => "must",
            Occur::Should => "should",
            Occur::MustNot => "must_not",
            Occur::Filter => "filter",
        }
    }
}

/// A compound query combining child queries under boolean occurrence kinds.
///
/// Children are grouped per occurrence kind in insertion order; a kind only
/// appears in the rendered output once it holds at least one child.
/// Duplicate children are kept and rendered twice.
///
/// ```rust
/// use serde_json::json;
/// use trawl::ast::{BoolQuery, Occur, TermQuery};
///
/// let query = BoolQuery::new()
///     .add(TermQuery::new("status", "published"), Occur::Must)
///     .add(TermQuery::new("hidden", true), Occur::MustNot);
///
/// use trawl::ast::Query;
/// assert_eq!(
///     query.to_value(),
///     json!({
///         "bool": {
///             "must": [{ "term": { "status": "published" } }],
///             "must_not": [{ "term": { "hidden": true } }],
///         }
///     })
/// );
/// ```
#[derive(Debug, Default)]
pub struct BoolQuery {
    clauses: IndexMap<Occur, Vec<Box<dyn Query>>>,
}

impl BoolQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `query` under the given occurrence kind.
    pub fn add(mut self, query: impl Query + 'static, occur: Occur) -> Self {
        self.push(Box::new(query), occur);
        self
    }

    /// Appends a boxed query under the given occurrence kind.
    pub fn push(&mut self, query: Box<dyn Query>, occur: Occur) {
        self.clauses.entry(occur).or_insert_with(Vec::new).push(query);
    }

    /// Appends a `must` clause.
    pub fn must(self, query: impl Query + 'static) -> Self {
        self.add(query, Occur::Must)
    }

    /// Appends a `should` clause.
    pub fn should(self, query: impl Query + 'static) -> Self {
        self.add(query, Occur::Should)
    }

    /// Appends a `must_not` clause.
    pub fn must_not(self, query: impl Query + 'static) -> Self {
        self.add(query, Occur::MustNot)
    }

    /// Appends a `filter` clause.
    pub fn filter(self, query: impl Query + 'static) -> Self {
        self.add(query, Occur::Filter)
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl Query for BoolQuery {
    fn to_value(&self) -> Value {
        let mut clauses = Map::new();

        for (occur, queries) in &self.clauses {
            let rendered = queries.iter().map(|query| query.to_value()).collect();
            clauses.insert(occur.as_str().to_owned(), Value::Array(rendered));
        }

        json!({ "bool": clauses })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ast::TermQuery;

    #[test]
    fn renders_only_the_occurrence_kinds_that_hold_clauses() {
        let query = BoolQuery::new()
            .must(TermQuery::new("status", "published"))
            .filter(TermQuery::new("tenant", 7));

        assert_eq!(
            query.to_value(),
            json!({
                "bool": {
                    "must": [{ "term": { "status": "published" } }],
                    "filter": [{ "term": { "tenant": 7 } }],
                }
            })
        );
    }

    #[test]
    fn keeps_clause_order_and_duplicates_within_a_kind() {
        let query = BoolQuery::new()
            .should(TermQuery::new("tag", "a"))
            .should(TermQuery::new("tag", "b"))
            .should(TermQuery::new("tag", "a"));

        assert_eq!(
            query.to_value(),
            json!({
                "bool": {
                    "should": [
                        { "term": { "tag": "a" } },
                        { "term": { "tag": "b" } },
                        { "term": { "tag": "a" } },
                    ]
                }
            })
        );
    }

    #[test]
    fn an_empty_compound_still_renders_the_bool_key() {
        assert_eq!(BoolQuery::new().to_value(), json!({ "bool": {} }));
    }

    #[test]
    fn nests_compounds_through_the_query_contract() {
        let inner = BoolQuery::new().must_not(TermQuery::new("archived", true));
        let query = BoolQuery::new().filter(inner);

        assert_eq!(
            query.to_value(),
            json!({
                "bool": {
                    "filter": [{
                        "bool": { "must_not": [{ "term": { "archived": true } }] }
                    }]
                }
            })
        );
    }
}
