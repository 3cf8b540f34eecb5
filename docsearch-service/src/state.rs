use crate::metrics::Metrics;
use docsearch_client::AlgoliaClient;
use docsearch_core::{Config, DocSource, MemoryCache, ResultCache, SourceConfig};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

pub type SharedState = Arc<AppState>;

pub struct SourceEntry {
    pub config: SourceConfig,
    pub source: DocSource,
}

pub struct AppState {
    sources: BTreeMap<String, SourceEntry>,
    pub metrics: Metrics,
}

impl AppState {
    /// Build one pipeline per configured source, all staging into one cache.
    pub fn from_config(config: &Config) -> Self {
        let cache: Arc<dyn ResultCache> = Arc::new(MemoryCache::new(config.stage_ttl()));
        let entries = config.sources.iter().map(|source| {
            if !source.has_credentials() {
                warn!(source = %source.name, "no search credentials configured");
            }
            let backend = Arc::new(AlgoliaClient::from_source(source));
            SourceEntry {
                config: source.clone(),
                source: DocSource::from_config(source, backend, Arc::clone(&cache)),
            }
        });
        Self::with_sources(entries)
    }

    pub fn with_sources(entries: impl IntoIterator<Item = SourceEntry>) -> Self {
        Self {
            sources: entries
                .into_iter()
                .map(|entry| (entry.config.name.clone(), entry))
                .collect(),
            metrics: Metrics::default(),
        }
    }

    pub fn source(&self, name: &str) -> Option<&SourceEntry> {
        self.sources.get(name)
    }

    pub fn sources(&self) -> impl Iterator<Item = &SourceEntry> {
        self.sources.values()
    }
}
