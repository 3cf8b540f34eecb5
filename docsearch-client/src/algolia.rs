//! HTTP client for Algolia DocSearch indexes

use async_trait::async_trait;
use docsearch_core::{DocsearchError, Hit, SearchBackend, SourceConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const USER_AGENT: &str = concat!("docsearch/", env!("CARGO_PKG_VERSION"));

pub struct AlgoliaClient {
    query_url: String,
    application_id: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    query: &'a str,
    hits_per_page: usize,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Deserialize)]
struct AlgoliaError {
    message: String,
}

impl AlgoliaClient {
    /// Client for `index` on the host derived from `application_id`.
    pub fn new(application_id: &str, api_key: &str, index: &str) -> Self {
        let endpoint = format!("https://{}.algolia.net", application_id.to_ascii_lowercase());
        Self::with_endpoint(&endpoint, application_id, api_key, index)
    }

    /// Client against an explicit host, e.g. a proxy or a test server.
    pub fn with_endpoint(endpoint: &str, application_id: &str, api_key: &str, index: &str) -> Self {
        Self {
            query_url: format!(
                "{}/1/indexes/{}/query",
                endpoint.trim_end_matches('/'),
                index
            ),
            application_id: application_id.to_string(),
            api_key: api_key.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_source(source: &SourceConfig) -> Self {
        match &source.endpoint {
            Some(endpoint) => Self::with_endpoint(
                endpoint,
                &source.application_id,
                &source.api_key,
                &source.index,
            ),
            None => Self::new(&source.application_id, &source.api_key, &source.index),
        }
    }

    pub fn query_url(&self) -> &str {
        &self.query_url
    }

    async fn handle_error<T>(&self, resp: reqwest::Response) -> Result<T, DocsearchError> {
        let status = resp.status();
        match resp.json::<AlgoliaError>().await {
            Ok(body) => Err(DocsearchError::backend(
                format!("http_{}", status.as_u16()),
                body.message,
                "Check the index name and search credentials",
            )),
            Err(_) => Err(DocsearchError::backend(
                format!("http_{}", status.as_u16()),
                format!("HTTP {} from search backend", status),
                "Check the search backend status",
            )),
        }
    }
}

#[async_trait]
impl SearchBackend for AlgoliaClient {
    async fn search(&self, query: &str, max_hits: usize) -> docsearch_core::Result<Vec<Hit>> {
        let req = QueryRequest {
            query,
            hits_per_page: max_hits,
        };
        let resp = self
            .client
            .post(&self.query_url)
            .header("X-Algolia-API-Key", &self.api_key)
            .header("X-Algolia-Application-Id", &self.application_id)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .json(&req)
            .send()
            .await
            .map_err(|e| {
                DocsearchError::backend(
                    "connection_error",
                    e.to_string(),
                    "Is the search backend reachable?",
                )
            })?;

        if !resp.status().is_success() {
            return self.handle_error(resp).await;
        }

        let body: QueryResponse = resp.json().await.map_err(|e| {
            DocsearchError::backend(
                "parse_error",
                e.to_string(),
                "Unexpected response from search backend",
            )
        })?;

        debug!(query, hits = body.hits.len(), "search complete");
        Ok(body.hits)
    }
}
