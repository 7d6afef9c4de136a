//! Search provider port
//!
//! Defines the interface for web search backends.

use async_trait::async_trait;
use riddle_domain::SearchResponse;

/// Web search backend
///
/// Implementations never fail: transport and API errors are reported as an
/// empty [`SearchResponse`] with its `error` field set, so the pipeline can
/// carry on with no documents.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Short provider name for logs (e.g. `"google"`).
    fn name(&self) -> &str;

    /// Search the web for `query`, asking for up to `top_k` results.
    async fn web_search(&self, query: &str, top_k: usize) -> SearchResponse;
}
