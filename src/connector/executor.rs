use async_trait::async_trait;
use serde_json::{Map, Value};

use super::Response;

/// Parameters for a search execution.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    /// The assembled request body.
    pub body: Map<String, Value>,
    /// The index to search, or the whole cluster when absent.
    pub index: Option<String>,
    /// The number of hits to return.
    pub size: Option<u64>,
    /// The offset to start returning hits from.
    pub from: Option<u64>,
}

/// Parameters for a count execution. A count is scoped by the request's
/// query alone, so no paging parameters exist here.
#[derive(Debug, Clone, PartialEq)]
pub struct CountParams {
    /// The assembled request body.
    pub body: Map<String, Value>,
    /// The index to count in, or the whole cluster when absent.
    pub index: Option<String>,
}

/// Represents a transport able to execute assembled requests.
///
/// Implementations own everything network: connections, retries, timeouts,
/// cancellation. A failure raised here reaches the caller untouched.
#[async_trait]
pub trait SearchExecutor: Send + Sync {
    /// Executes a search request.
    async fn execute_search(&self, params: SearchParams) -> crate::Result<Response>;

    /// Executes a count request.
    async fn execute_count(&self, params: CountParams) -> crate::Result<Response>;
}
