//! An abstract syntax tree for search requests.
//!
//! The tree has three node families sharing one contract, "render yourself
//! as a JSON value": query clauses ([`Query`]), aggregation definitions
//! ([`Aggregation`]) and sort keys ([`Sort`]). Compound nodes own their
//! children through the family trait and render by recursion, so a request
//! serializes top-down in one pure pass.

mod aggregation;
mod bool_query;
mod exists_query;
mod match_query;
mod query;
mod range_query;
mod sort;
mod term_query;

pub use aggregation::*;
pub use bool_query::*;
pub use exists_query::*;
pub use match_query::*;
pub use query::*;
pub use range_query::*;
pub use sort::*;
pub use term_query::*;
