//! # trawl
//!
//! An abstraction layer for Elasticsearch search requests.
//!
//! The crate builds a search request as a tree of nodes — query clauses,
//! aggregation definitions, sort keys — and assembles the tree into the
//! single JSON body the cluster's HTTP API takes. Dispatch goes through the
//! [`connector::SearchExecutor`] trait, so any HTTP client can carry the
//! request; the crate itself stays a pure in-memory transformation.
//!
//! ### Goals
//!
//! - Build the `query`/`aggs`/`sort`/`_source`/`search_after` body through
//!   chained calls, leaving untouched features out of the wire document.
//! - Keep serialization deterministic: clause groups, aggregation names and
//!   sort keys all render in insertion order.
//! - Treat the transport as a collaborator: no retries, no timeouts, no
//!   response interpretation beyond unwrapping the decoded document.
//!
//! ### Example
//!
//! ```rust
//! use serde_json::{Value, json};
//! use trawl::prelude::*;
//! # use async_trait::async_trait;
//! # struct Transport;
//! # #[async_trait]
//! # impl SearchExecutor for Transport {
//! #     async fn execute_search(&self, _: SearchParams) -> trawl::Result<Response> {
//! #         Ok(Response::new(json!({})))
//! #     }
//! #     async fn execute_count(&self, _: CountParams) -> trawl::Result<Response> {
//! #         Ok(Response::new(json!({})))
//! #     }
//! # }
//! # let transport = Transport;
//!
//! let builder = SearchBuilder::new(&transport)
//!     .index("products")
//!     .size(25)
//!     .add_query(MatchQuery::new("title", "storm lantern"))
//!     .add_query_as(RangeQuery::new("price").lte(200), Occur::Filter)
//!     .add_aggregation("by_color", TermsAggregation::new("color").size(10))
//!     .add_sort(FieldSort::new("price", SortOrder::Asc));
//!
//! assert_eq!(
//!     Value::Object(builder.payload()),
//!     json!({
//!         "query": {
//!             "bool": {
//!                 "must": [{ "match": { "title": "storm lantern" } }],
//!                 "filter": [{ "range": { "price": { "lte": 200 } } }],
//!             }
//!         },
//!         "aggs": { "by_color": { "terms": { "field": "color", "size": 10 } } },
//!         "sort": [{ "price": { "order": "asc" } }],
//!     })
//! );
//!
//! // builder.search().await? runs the request through the transport.
//! ```

pub mod ast;
pub mod connector;
pub mod error;

mod builder;

pub use builder::SearchBuilder;
pub use error::Error;

/// A specialized result type to reduce the boilerplate.
pub type Result<T> = std::result::Result<T, Error>;

/// A "prelude" for users of the crate.
pub mod prelude {
    pub use crate::ast::*;
    pub use crate::connector::{CountParams, Response, SearchExecutor, SearchParams};
    pub use crate::{Error, SearchBuilder};
}
