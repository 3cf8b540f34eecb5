//! Two-phase search/select pipeline for one documentation source
//!
//! The suggestion phase searches as the user types, stages every displayable
//! hit in the result cache and returns `(label, key)` choices. The resolution
//! phase turns the chosen key (or free text) back into a rendered message,
//! preferring the staged hit and re-querying the backend when it is gone.

use crate::cache::ResultCache;
use crate::config::SourceConfig;
use crate::hierarchy::{build_hierarchical_name, cut_text};
use crate::key::{LookupKey, Selection};
use crate::render::{self, Branding, ResponseMessage};
use crate::{Hit, Namespace, SearchBackend};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Hits requested while the user is typing.
pub const SUGGESTION_HIT_LIMIT: usize = 25;
/// Hits requested when a selection has to be searched again.
pub const RESOLUTION_HIT_LIMIT: usize = 5;
/// Most choices the interaction surface accepts.
pub const MAX_SUGGESTIONS: usize = 19;
/// Longest label the interaction surface accepts.
pub const MAX_LABEL_CHARS: usize = 100;

/// A selectable choice: display label plus the lookup key echoed back on selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub value: String,
}

/// Which path produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Served from the staged hit without a backend call.
    Staged,
    /// Rendered from a fresh backend search.
    Searched,
    /// The fresh search returned nothing displayable.
    NotFound,
}

#[derive(Debug, Clone)]
pub struct Resolved {
    pub message: ResponseMessage,
    pub outcome: Outcome,
}

pub struct DocSource {
    namespace: Namespace,
    branding: Branding,
    backend: Arc<dyn SearchBackend>,
    cache: Arc<dyn ResultCache>,
}

impl DocSource {
    pub fn new(
        namespace: Namespace,
        branding: Branding,
        backend: Arc<dyn SearchBackend>,
        cache: Arc<dyn ResultCache>,
    ) -> Self {
        Self {
            namespace,
            branding,
            backend,
            cache,
        }
    }

    pub fn from_config(
        source: &SourceConfig,
        backend: Arc<dyn SearchBackend>,
        cache: Arc<dyn ResultCache>,
    ) -> Self {
        Self::new(source.namespace.clone(), source.branding(), backend, cache)
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Search for `raw_query` and stage the results for later selection.
    ///
    /// Every staging write has completed when this returns, so a resolution
    /// for any returned key can observe its staged hit.
    pub async fn suggest(&self, raw_query: &str) -> crate::Result<Vec<Suggestion>> {
        if raw_query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let hits = self.backend.search(raw_query, SUGGESTION_HIT_LIMIT).await?;

        let mut staged = Vec::with_capacity(hits.len());
        let mut suggestions = Vec::with_capacity(hits.len());
        for (ordinal, hit) in hits.into_iter().enumerate() {
            let Some(label) = build_hierarchical_name(&hit.hierarchy, false) else {
                trace!(ordinal, url = %hit.url, "dropping hit without hierarchy");
                continue;
            };
            let key = LookupKey::new(self.namespace.clone(), raw_query, ordinal);
            suggestions.push(Suggestion {
                name: cut_text(&label, MAX_LABEL_CHARS),
                value: key.to_string(),
            });
            staged.push((key, hit));
        }

        let writes = join_all(staged.iter().map(|(key, hit)| self.cache.stage(key, hit))).await;
        for (result, (key, _)) in writes.into_iter().zip(&staged) {
            if let Err(err) = result {
                warn!(key = %key, error = %err, "failed to stage suggestion");
            }
        }

        debug!(
            namespace = %self.namespace,
            staged = staged.len(),
            "suggestions ready"
        );
        suggestions.truncate(MAX_SUGGESTIONS);
        Ok(suggestions)
    }

    /// Resolve a submitted value into the outbound message.
    ///
    /// `selected` is either a lookup key from [`DocSource::suggest`] or free
    /// text. A key is only looked up in the cache when it carries this
    /// source's namespace; a miss, an unusable staged hit or a foreign key
    /// searches again with the key's embedded query. `target` is a user to
    /// mention alongside the result.
    pub async fn resolve(&self, selected: &str, target: Option<&str>) -> crate::Result<Resolved> {
        let selection = Selection::parse(selected);

        if let Selection::Key(key) = &selection {
            // Another source's key can never be staged here; its query still applies.
            if key.namespace == self.namespace {
                if let Some(resolved) = self.resolve_staged(key, target).await {
                    return Ok(resolved);
                }
                debug!(key = %key, "staged hit unavailable, searching again");
            } else {
                debug!(key = %key, "key minted by another source, searching its query");
            }
        }

        let query = selection.query();
        let hits: Vec<Hit> = self
            .backend
            .search(query, RESOLUTION_HIT_LIMIT)
            .await?
            .into_iter()
            .filter(|hit| !hit.hierarchy.is_empty())
            .collect();

        if hits.is_empty() {
            return Ok(Resolved {
                message: render::not_found(query, target),
                outcome: Outcome::NotFound,
            });
        }

        Ok(Resolved {
            message: render::hit_list(&self.branding, &hits, target),
            outcome: Outcome::Searched,
        })
    }

    async fn resolve_staged(&self, key: &LookupKey, target: Option<&str>) -> Option<Resolved> {
        let hit = self.cache.fetch(key).await?;
        let name = build_hierarchical_name(&hit.hierarchy, true)?;
        Some(Resolved {
            message: render::single_link(&self.branding, &name, &hit, target),
            outcome: Outcome::Staged,
        })
    }
}
