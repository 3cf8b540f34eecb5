//! Ranked-search backend abstraction

use crate::Hit;
use async_trait::async_trait;

/// An external index answering free-text queries with ranked hits.
///
/// Implementations preserve the backend's ranking. An empty list is a valid
/// answer; transport and backend failures are `DocsearchError::Backend`.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &str, max_hits: usize) -> crate::Result<Vec<Hit>>;
}
