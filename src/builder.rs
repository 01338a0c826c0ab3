use std::fmt;

use serde_json::{Map, Value};

use crate::ast::{
    Aggregation, AggregationCollection, BoolQuery, Occur, Query, Sort, SortCollection,
};
use crate::connector::{CountParams, Response, SearchExecutor, SearchParams};
use crate::error::{Error, json_kind};

/// The entry point for assembling and dispatching a search request.
///
/// A builder accumulates request state through chained calls, assembles it
/// into a single JSON body on demand, and runs the request through the
/// transport it borrows. State the caller never touched stays out of the
/// body entirely.
///
/// Each logical request should use its own builder; the builder is a plain
/// single-owner value and its mutations are not synchronized.
///
/// ```rust
/// use serde_json::{Value, json};
/// use trawl::SearchBuilder;
/// use trawl::ast::{MatchQuery, NestedSort, Occur, SortOrder, TermQuery};
/// # use async_trait::async_trait;
/// # use trawl::connector::{CountParams, Response, SearchExecutor, SearchParams};
/// # struct Transport;
/// # #[async_trait]
/// # impl SearchExecutor for Transport {
/// #     async fn execute_search(&self, _: SearchParams) -> trawl::Result<Response> {
/// #         Ok(Response::new(json!({})))
/// #     }
/// #     async fn execute_count(&self, _: CountParams) -> trawl::Result<Response> {
/// #         Ok(Response::new(json!({})))
/// #     }
/// # }
/// # let transport = Transport;
///
/// let builder = SearchBuilder::new(&transport)
///     .index("products")
///     .add_query(MatchQuery::new("title", "lantern"))
///     .add_query_as(TermQuery::new("in_stock", true), Occur::Filter)
///     .add_sort(NestedSort::new("offers.price", "offers").order(SortOrder::Asc));
///
/// assert_eq!(
///     Value::Object(builder.payload()),
///     json!({
///         "query": {
///             "bool": {
///                 "must": [{ "match": { "title": "lantern" } }],
///                 "filter": [{ "term": { "in_stock": true } }],
///             }
///         },
///         "sort": [{
///             "offers.price": { "nested": { "path": "offers" }, "order": "asc" }
///         }],
///     })
/// );
/// ```
pub struct SearchBuilder<'a, E: ?Sized> {
    executor: &'a E,
    query: Option<BoolQuery>,
    aggregations: Option<AggregationCollection>,
    sorts: Option<SortCollection>,
    index: Option<String>,
    size: Option<u64>,
    from: Option<u64>,
    search_after: Option<Vec<Value>>,
    fields: Option<Vec<String>>,
    with_aggregations: bool,
}

impl<'a, E: ?Sized> SearchBuilder<'a, E> {
    pub fn new(executor: &'a E) -> Self {
        Self {
            executor,
            query: None,
            aggregations: None,
            sorts: None,
            index: None,
            size: None,
            from: None,
            search_after: None,
            fields: None,
            with_aggregations: true,
        }
    }

    /// Adds a `must` clause to the request's root [`BoolQuery`], creating
    /// the root on first use.
    pub fn add_query(self, query: impl Query + 'static) -> Self {
        self.add_query_as(query, Occur::Must)
    }

    /// Adds a clause under the given occurrence kind to the request's root
    /// [`BoolQuery`], creating the root on first use.
    pub fn add_query_as(mut self, query: impl Query + 'static, occur: Occur) -> Self {
        self.query
            .get_or_insert_with(BoolQuery::new)
            .push(Box::new(query), occur);
        self
    }

    /// Adds a named aggregation, creating the collection on first use.
    /// Reusing a name replaces the definition, keeping its position.
    pub fn add_aggregation(
        mut self,
        name: impl Into<String>,
        aggregation: impl Aggregation + 'static,
    ) -> Self {
        self.aggregations
            .get_or_insert_with(AggregationCollection::new)
            .insert(name, Box::new(aggregation));
        self
    }

    /// Appends a sort key, creating the collection on first use.
    pub fn add_sort(mut self, sort: impl Sort + 'static) -> Self {
        self.sorts.get_or_insert_with(SortCollection::new).push(Box::new(sort));
        self
    }

    /// The index to run the request against.
    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// The number of hits to return.
    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// The offset to start returning hits from.
    pub fn from(mut self, from: u64) -> Self {
        self.from = Some(from);
        self
    }

    /// The sort-key values of the last hit of the previous page, for
    /// cursor-style pagination.
    pub fn search_after(mut self, search_after: Vec<Value>) -> Self {
        self.search_after = Some(search_after);
        self
    }

    /// Restricts `_source` to the given fields. Fields given across calls
    /// accumulate; names are kept as given, duplicates included.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields
            .get_or_insert_with(Vec::new)
            .extend(fields.into_iter().map(Into::into));
        self
    }

    /// Leaves the accumulated aggregations out of the assembled body.
    pub fn without_aggregations(mut self) -> Self {
        self.with_aggregations = false;
        self
    }

    /// Assembles the accumulated state into the request body.
    ///
    /// Keys appear in a fixed precedence — `query`, `aggs`, `sort`,
    /// `_source`, `search_after` — and only for state that is actually
    /// present, so an untouched builder assembles to `{}`.
    pub fn payload(&self) -> Map<String, Value> {
        let mut payload = Map::new();

        if let Some(query) = &self.query {
            payload.insert("query".to_owned(), query.to_value());
        }

        if self.with_aggregations {
            if let Some(aggregations) = &self.aggregations {
                payload.insert("aggs".to_owned(), aggregations.to_value());
            }
        }

        if let Some(sorts) = &self.sorts {
            payload.insert("sort".to_owned(), sorts.to_value());
        }

        if let Some(fields) = &self.fields {
            if !fields.is_empty() {
                let fields = fields.iter().cloned().map(Value::String).collect();
                payload.insert("_source".to_owned(), Value::Array(fields));
            }
        }

        if let Some(search_after) = &self.search_after {
            if !search_after.is_empty() {
                payload.insert("search_after".to_owned(), Value::Array(search_after.clone()));
            }
        }

        payload
    }
}

impl<E: SearchExecutor + ?Sized> SearchBuilder<'_, E> {
    /// Runs the assembled request as a search and returns the decoded
    /// response document.
    pub async fn search(&self) -> crate::Result<Map<String, Value>> {
        let params = SearchParams {
            body: self.payload(),
            index: self.index.clone(),
            size: self.size,
            from: self.from,
        };

        tracing::debug!(
            index = params.index.as_deref(),
            size = params.size,
            from = params.from,
            "dispatching search request"
        );

        let response = self.executor.execute_search(params).await?;

        expect_document(response)
    }

    /// Runs the assembled request as a count and returns the decoded
    /// response document. A count is scoped by the query alone; size and
    /// from are never forwarded.
    pub async fn count(&self) -> crate::Result<Map<String, Value>> {
        let params = CountParams {
            body: self.payload(),
            index: self.index.clone(),
        };

        tracing::debug!(index = params.index.as_deref(), "dispatching count request");

        let response = self.executor.execute_count(params).await?;

        expect_document(response)
    }
}

/// Unwraps a resolved response, requiring the body to be a JSON object.
/// Anything else means the transport is not speaking the expected contract.
fn expect_document(response: Response) -> crate::Result<Map<String, Value>> {
    match response.into_body() {
        Value::Object(document) => Ok(document),
        other => Err(Error::unexpected_response(json_kind(&other))),
    }
}

impl<E: ?Sized> fmt::Debug for SearchBuilder<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchBuilder")
            .field("query", &self.query)
            .field("aggregations", &self.aggregations)
            .field("sorts", &self.sorts)
            .field("index", &self.index)
            .field("size", &self.size)
            .field("from", &self.from)
            .field("search_after", &self.search_after)
            .field("fields", &self.fields)
            .field("with_aggregations", &self.with_aggregations)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::ast::{
        AverageAggregation, ExistsQuery, MatchQuery, MaxAggregation, NestedSort, SortOrder,
        TermQuery, TermsAggregation,
    };
    use crate::error::ErrorKind;

    /// A transport double: records the parameters it was handed and
    /// resolves to a canned body after yielding once to the runtime.
    struct StubExecutor {
        body: Value,
        searches: Mutex<Vec<SearchParams>>,
        counts: Mutex<Vec<CountParams>>,
    }

    impl StubExecutor {
        fn resolving_to(body: Value) -> Self {
            Self {
                body,
                searches: Mutex::new(Vec::new()),
                counts: Mutex::new(Vec::new()),
            }
        }

        fn last_search(&self) -> SearchParams {
            self.searches.lock().unwrap().last().cloned().unwrap()
        }

        fn last_count(&self) -> CountParams {
            self.counts.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl SearchExecutor for StubExecutor {
        async fn execute_search(&self, params: SearchParams) -> crate::Result<Response> {
            self.searches.lock().unwrap().push(params);
            tokio::task::yield_now().await;
            Ok(Response::new(self.body.clone()))
        }

        async fn execute_count(&self, params: CountParams) -> crate::Result<Response> {
            self.counts.lock().unwrap().push(params);
            tokio::task::yield_now().await;
            Ok(Response::new(self.body.clone()))
        }
    }

    struct BrokenExecutor;

    #[async_trait]
    impl SearchExecutor for BrokenExecutor {
        async fn execute_search(&self, _: SearchParams) -> crate::Result<Response> {
            Err(Error::transport(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )))
        }

        async fn execute_count(&self, _: CountParams) -> crate::Result<Response> {
            Err(Error::transport(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )))
        }
    }

    fn object(payload: Map<String, Value>) -> Value {
        Value::Object(payload)
    }

    #[test]
    fn an_untouched_builder_assembles_an_empty_body() {
        let executor = StubExecutor::resolving_to(json!({}));
        let builder = SearchBuilder::new(&executor);

        assert!(builder.payload().is_empty());
    }

    #[test]
    fn clauses_group_under_exactly_the_kinds_that_were_used() {
        let executor = StubExecutor::resolving_to(json!({}));
        let builder = SearchBuilder::new(&executor)
            .add_query(MatchQuery::new("title", "lantern"))
            .add_query_as(TermQuery::new("in_stock", true), Occur::Filter)
            .add_query_as(ExistsQuery::new("deleted_at"), Occur::MustNot)
            .add_query_as(MatchQuery::new("title", "rusty"), Occur::Must);

        assert_eq!(
            object(builder.payload()),
            json!({
                "query": {
                    "bool": {
                        "must": [
                            { "match": { "title": "lantern" } },
                            { "match": { "title": "rusty" } },
                        ],
                        "filter": [{ "term": { "in_stock": true } }],
                        "must_not": [{ "exists": { "field": "deleted_at" } }],
                    }
                }
            })
        );
    }

    #[test]
    fn body_keys_follow_the_assembly_precedence() {
        let executor = StubExecutor::resolving_to(json!({}));
        let builder = SearchBuilder::new(&executor)
            .search_after(vec![json!(1719)])
            .fields(["title"])
            .add_sort(NestedSort::new("offers.price", "offers"))
            .add_aggregation("avg_price", AverageAggregation::new("price"))
            .add_query(TermQuery::new("status", "published"));

        let keys: Vec<String> = builder.payload().keys().cloned().collect();

        assert_eq!(keys, ["query", "aggs", "sort", "_source", "search_after"]);
    }

    #[test]
    fn aggregations_keep_first_seen_order_and_replace_in_place() {
        let executor = StubExecutor::resolving_to(json!({}));
        let builder = SearchBuilder::new(&executor)
            .add_aggregation("stat", AverageAggregation::new("price"))
            .add_aggregation("by_color", TermsAggregation::new("color"))
            .add_aggregation("stat", MaxAggregation::new("price"));

        let payload = builder.payload();
        let names: Vec<&String> = payload["aggs"].as_object().unwrap().keys().collect();

        assert_eq!(names, ["stat", "by_color"]);
        assert_eq!(payload["aggs"]["stat"], json!({ "max": { "field": "price" } }));
    }

    #[test]
    fn without_aggregations_hides_the_aggs_key_but_keeps_the_collection() {
        let executor = StubExecutor::resolving_to(json!({}));
        let builder = SearchBuilder::new(&executor)
            .add_aggregation("avg_price", AverageAggregation::new("price"))
            .without_aggregations();

        assert!(!builder.payload().contains_key("aggs"));
        assert!(!builder.aggregations.as_ref().unwrap().is_empty());
    }

    #[test]
    fn sort_keys_stay_in_call_order() {
        let executor = StubExecutor::resolving_to(json!({}));
        let builder = SearchBuilder::new(&executor)
            .add_sort(NestedSort::new("offers.price", "offers").order(SortOrder::Asc))
            .add_sort(NestedSort::new("offers.stock", "offers"));

        assert_eq!(
            builder.payload()["sort"],
            json!([
                { "offers.price": { "nested": { "path": "offers" }, "order": "asc" } },
                { "offers.stock": { "nested": { "path": "offers" }, "order": "desc" } },
            ])
        );
    }

    #[test]
    fn fields_accumulate_across_calls_keeping_duplicates() {
        let executor = StubExecutor::resolving_to(json!({}));
        let builder = SearchBuilder::new(&executor)
            .fields(["a"])
            .fields(["b", "a"]);

        assert_eq!(builder.payload()["_source"], json!(["a", "b", "a"]));
    }

    #[test]
    fn an_empty_search_after_cursor_is_left_out() {
        let executor = StubExecutor::resolving_to(json!({}));
        let builder = SearchBuilder::new(&executor).search_after(Vec::new());

        assert!(builder.payload().is_empty());
    }

    #[test]
    fn assembles_the_match_plus_nested_sort_request() {
        let executor = StubExecutor::resolving_to(json!({}));
        let builder = SearchBuilder::new(&executor)
            .add_query(MatchQuery::new("title", "x"))
            .add_sort(NestedSort::new("price", "variants").order(SortOrder::Asc));

        assert_eq!(
            object(builder.payload()),
            json!({
                "query": { "bool": { "must": [{ "match": { "title": "x" } }] } },
                "sort": [{
                    "price": { "nested": { "path": "variants" }, "order": "asc" }
                }],
            })
        );
    }

    #[tokio::test]
    async fn search_forwards_paging_parameters_and_returns_the_document() {
        let executor = StubExecutor::resolving_to(json!({ "hits": { "total": 3 } }));
        let builder = SearchBuilder::new(&executor)
            .index("products")
            .size(20)
            .from(40)
            .add_query(TermQuery::new("status", "published"));

        let document = builder.search().await.unwrap();

        assert_eq!(Value::Object(document), json!({ "hits": { "total": 3 } }));

        let params = executor.last_search();
        assert_eq!(params.index.as_deref(), Some("products"));
        assert_eq!(params.size, Some(20));
        assert_eq!(params.from, Some(40));
        assert_eq!(Value::Object(params.body), object(builder.payload()));
    }

    #[tokio::test]
    async fn count_forwards_the_body_and_index_only() {
        let executor = StubExecutor::resolving_to(json!({ "count": 3 }));
        let builder = SearchBuilder::new(&executor)
            .index("products")
            .size(20)
            .from(40)
            .add_query(TermQuery::new("status", "published"));

        let document = builder.count().await.unwrap();

        assert_eq!(document["count"], json!(3));

        let params = executor.last_count();
        assert_eq!(params.index.as_deref(), Some("products"));
        assert_eq!(Value::Object(params.body), object(builder.payload()));
    }

    #[tokio::test]
    async fn a_non_document_response_raises_unexpected_response() {
        let executor = StubExecutor::resolving_to(json!([1, 2, 3]));
        let builder = SearchBuilder::new(&executor);

        let error = builder.search().await.unwrap_err();

        assert!(error.is_unexpected_response());
        assert!(
            matches!(error.kind(), ErrorKind::UnexpectedResponse { actual } if *actual == "array")
        );
    }

    #[tokio::test]
    async fn transport_failures_pass_through_untouched() {
        let builder = SearchBuilder::new(&BrokenExecutor);

        let error = builder.count().await.unwrap_err();

        assert!(!error.is_unexpected_response());
        assert!(matches!(error.kind(), ErrorKind::Transport(_)));
    }
}
