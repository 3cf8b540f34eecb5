//! End-to-end tests for the suggestion and resolution phases.
//!
//! A scripted in-process backend records every search so tests can assert
//! when the cache fast path avoided a backend call.

use async_trait::async_trait;
use docsearch_core::source::{
    MAX_LABEL_CHARS, MAX_SUGGESTIONS, RESOLUTION_HIT_LIMIT, SUGGESTION_HIT_LIMIT,
};
use docsearch_core::{
    Branding, DocSource, DocsearchError, Hierarchy, Hit, LookupKey, MemoryCache, Namespace,
    Outcome, ResultCache, SearchBackend,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ScriptedBackend {
    responses: HashMap<String, Vec<Hit>>,
    calls: Mutex<Vec<(String, usize)>>,
}

impl ScriptedBackend {
    fn with(mut self, query: &str, hits: Vec<Hit>) -> Self {
        self.responses.insert(query.to_string(), hits);
        self
    }

    fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchBackend for ScriptedBackend {
    async fn search(&self, query: &str, max_hits: usize) -> docsearch_core::Result<Vec<Hit>> {
        self.calls.lock().unwrap().push((query.to_string(), max_hits));
        let mut hits = self.responses.get(query).cloned().unwrap_or_default();
        hits.truncate(max_hits);
        Ok(hits)
    }
}

struct FailingBackend;

#[async_trait]
impl SearchBackend for FailingBackend {
    async fn search(&self, _query: &str, _max_hits: usize) -> docsearch_core::Result<Vec<Hit>> {
        Err(DocsearchError::backend(
            "connection_error",
            "connection refused",
            "Is the search backend reachable?",
        ))
    }
}

struct BrokenCache;

#[async_trait]
impl ResultCache for BrokenCache {
    async fn stage(&self, _key: &LookupKey, _hit: &Hit) -> docsearch_core::Result<()> {
        Err(DocsearchError::Cache("store unavailable".to_string()))
    }

    async fn fetch(&self, _key: &LookupKey) -> Option<Hit> {
        None
    }
}

fn namespace() -> Namespace {
    Namespace::new("discord-docs").unwrap()
}

fn branding() -> Branding {
    Branding {
        title: "Discord Developer docs".to_string(),
        root_url: "https://discord.com/developers/docs".to_string(),
        icon: String::new(),
    }
}

fn hit(levels: [Option<&str>; 4], url: &str) -> Hit {
    let [lvl0, lvl1, lvl2, lvl3] = levels.map(|l| l.map(str::to_string));
    Hit {
        hierarchy: Hierarchy {
            lvl0,
            lvl1,
            lvl2,
            lvl3,
        },
        url: url.to_string(),
    }
}

fn rate_limit_hits() -> Vec<Hit> {
    vec![
        hit(
            [Some("Topics"), Some("Rate Limits"), None, None],
            "https://discord.com/developers/docs/topics/rate-limits",
        ),
        hit(
            [Some("Topics"), Some("Rate Limits"), Some("Global Rate Limit"), None],
            "https://discord.com/developers/docs/topics/rate-limits#global-rate-limit",
        ),
        hit(
            [Some("Topics"), Some("Rate Limits"), Some("Header Format"), Some("Example")],
            "https://discord.com/developers/docs/topics/rate-limits#header-format",
        ),
    ]
}

fn source(backend: Arc<dyn SearchBackend>, cache: Arc<dyn ResultCache>) -> DocSource {
    DocSource::new(namespace(), branding(), backend, cache)
}

// ---------------------------------------------------------------------------
// Suggestion phase
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_query_returns_nothing_without_searching() {
    let backend = Arc::new(ScriptedBackend::default());
    let docs = source(backend.clone(), Arc::new(MemoryCache::default()));

    assert!(docs.suggest("").await.unwrap().is_empty());
    assert!(docs.suggest("   ").await.unwrap().is_empty());
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn suggestions_are_capped_and_labels_truncated() {
    let long_title = "Very long section title ".repeat(10);
    let hits: Vec<Hit> = (0..25)
        .map(|i| {
            hit(
                [Some("Topics"), Some(long_title.as_str()), None, None],
                &format!("https://d.example/{i}"),
            )
        })
        .collect();
    let backend = Arc::new(ScriptedBackend::default().with("gateway", hits));
    let cache = Arc::new(MemoryCache::default());
    let docs = source(backend.clone(), cache.clone());

    let suggestions = docs.suggest("gateway").await.unwrap();

    assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
    assert!(suggestions
        .iter()
        .all(|s| s.name.chars().count() <= MAX_LABEL_CHARS));
    assert_eq!(backend.calls(), vec![("gateway".to_string(), SUGGESTION_HIT_LIMIT)]);

    // All 25 are staged even though only 19 are offered.
    let last = LookupKey::new(namespace(), "gateway", 24);
    assert!(cache.fetch(&last).await.is_some());
}

#[tokio::test]
async fn undisplayable_hits_keep_their_ordinal_gap() {
    let hits = vec![
        hit([None, Some("Intro"), None, None], "https://d.example/intro"),
        hit([None, None, None, None], "https://d.example/empty"),
        hit([None, Some("Outro"), None, None], "https://d.example/outro"),
    ];
    let backend = Arc::new(ScriptedBackend::default().with("intro", hits));
    let cache = Arc::new(MemoryCache::default());
    let docs = source(backend, cache.clone());

    let suggestions = docs.suggest("intro").await.unwrap();

    let values: Vec<&str> = suggestions.iter().map(|s| s.value.as_str()).collect();
    assert_eq!(values, vec!["discord-docs:intro:0", "discord-docs:intro:2"]);
    assert!(cache
        .fetch(&LookupKey::new(namespace(), "intro", 1))
        .await
        .is_none());
}

#[tokio::test]
async fn staging_failures_do_not_fail_suggestions() {
    let backend = Arc::new(ScriptedBackend::default().with("rate limit", rate_limit_hits()));
    let docs = source(backend, Arc::new(BrokenCache));

    let suggestions = docs.suggest("rate limit").await.unwrap();
    assert_eq!(suggestions.len(), 3);
}

// ---------------------------------------------------------------------------
// Resolution phase
// ---------------------------------------------------------------------------

#[tokio::test]
async fn selected_key_resolves_from_cache_without_backend_call() {
    let backend = Arc::new(ScriptedBackend::default().with("rate limit", rate_limit_hits()));
    let docs = source(backend.clone(), Arc::new(MemoryCache::default()));

    let suggestions = docs.suggest("rate limit").await.unwrap();
    assert_eq!(suggestions.len(), 3);
    assert_eq!(suggestions[1].value, "discord-docs:rate limit:1");
    assert_eq!(suggestions[1].name, "Rate Limits > Global Rate Limit");
    let calls_after_suggest = backend.calls().len();

    let resolved = docs
        .resolve("discord-docs:rate limit:1", None)
        .await
        .unwrap();

    assert_eq!(resolved.outcome, Outcome::Staged);
    assert_eq!(backend.calls().len(), calls_after_suggest);
    assert_eq!(
        resolved.message.content,
        "[Discord Developer docs](<https://discord.com/developers/docs>) results:\n\
         [Global Rate Limit](<https://discord.com/developers/docs/topics/rate-limits#global-rate-limit>)"
    );
    assert!(resolved.message.allowed_mentions.is_empty());
}

#[tokio::test]
async fn free_text_searches_with_resolution_cap() {
    let backend = Arc::new(ScriptedBackend::default().with("rate limit", rate_limit_hits()));
    let docs = source(backend.clone(), Arc::new(MemoryCache::default()));

    let resolved = docs.resolve("rate limit", Some("80351110224678912")).await.unwrap();

    assert_eq!(resolved.outcome, Outcome::Searched);
    assert_eq!(
        backend.calls(),
        vec![("rate limit".to_string(), RESOLUTION_HIT_LIMIT)]
    );
    let lines: Vec<&str> = resolved.message.content.lines().collect();
    assert_eq!(lines[0], "*Documentation suggestion for <@80351110224678912>:*");
    assert_eq!(
        lines[2],
        "• Topics: [Rate Limits](<https://discord.com/developers/docs/topics/rate-limits>)"
    );
    assert_eq!(
        lines[4],
        "• Topics: [Header Format](<https://discord.com/developers/docs/topics/rate-limits#header-format>) - Example"
    );
    assert_eq!(
        resolved.message.allowed_mentions,
        vec!["80351110224678912".to_string()]
    );
}

#[tokio::test]
async fn cache_miss_falls_back_to_query_from_key() {
    let backend = Arc::new(ScriptedBackend::default().with("rate limit", rate_limit_hits()));
    let docs = source(backend.clone(), Arc::new(MemoryCache::default()));

    // Never staged: the ordinal is discarded and the key's query is searched.
    let resolved = docs
        .resolve("discord-docs:rate limit:1", None)
        .await
        .unwrap();

    assert_eq!(resolved.outcome, Outcome::Searched);
    assert_eq!(
        backend.calls(),
        vec![("rate limit".to_string(), RESOLUTION_HIT_LIMIT)]
    );
}

#[tokio::test(start_paused = true)]
async fn expired_selection_falls_back_to_search() {
    let backend = Arc::new(ScriptedBackend::default().with("rate limit", rate_limit_hits()));
    let docs = source(backend.clone(), Arc::new(MemoryCache::default()));

    docs.suggest("rate limit").await.unwrap();
    tokio::time::advance(Duration::from_secs(61)).await;

    let resolved = docs
        .resolve("discord-docs:rate limit:2", None)
        .await
        .unwrap();
    assert_eq!(resolved.outcome, Outcome::Searched);
    assert_eq!(backend.calls().len(), 2);
}

#[tokio::test]
async fn key_for_other_namespace_searches_its_query() {
    let backend = Arc::new(ScriptedBackend::default().with("rate limit", rate_limit_hits()));
    let cache = Arc::new(MemoryCache::default());
    let docs = source(backend.clone(), cache.clone());

    // Staged under this source's namespace, but the selection names another.
    docs.suggest("rate limit").await.unwrap();
    let resolved = docs
        .resolve("discordjs-guide:rate limit:1", None)
        .await
        .unwrap();

    assert_eq!(resolved.outcome, Outcome::Searched);
    assert_eq!(
        backend.calls(),
        vec![
            ("rate limit".to_string(), SUGGESTION_HIT_LIMIT),
            ("rate limit".to_string(), RESOLUTION_HIT_LIMIT),
        ]
    );
}

#[tokio::test]
async fn staged_hit_without_hierarchy_falls_back_to_search() {
    let backend = Arc::new(ScriptedBackend::default().with("rate limit", rate_limit_hits()));
    let cache = Arc::new(MemoryCache::default());
    let docs = source(backend.clone(), cache.clone());

    let key = LookupKey::new(namespace(), "rate limit", 0);
    cache
        .stage(&key, &hit([None; 4], "https://d.example/blank"))
        .await
        .unwrap();

    let resolved = docs.resolve(&key.to_string(), None).await.unwrap();

    assert_eq!(resolved.outcome, Outcome::Searched);
    assert_eq!(
        backend.calls(),
        vec![("rate limit".to_string(), RESOLUTION_HIT_LIMIT)]
    );
    assert!(resolved.message.content.contains("[Rate Limits]"));
}

#[tokio::test]
async fn no_results_renders_not_found() {
    let backend = Arc::new(ScriptedBackend::default());
    let docs = source(backend, Arc::new(MemoryCache::default()));

    let resolved = docs.resolve("nothing here", Some("42")).await.unwrap();
    assert_eq!(resolved.outcome, Outcome::NotFound);
    assert_eq!(resolved.message.content, "no results were found for `nothing here`");
    assert_eq!(resolved.message.allowed_mentions, vec!["42".to_string()]);
    assert!(resolved.message.ephemeral);

    let resolved = docs.resolve("nothing here", None).await.unwrap();
    assert!(resolved.message.allowed_mentions.is_empty());
}

#[tokio::test]
async fn only_undisplayable_hits_renders_not_found() {
    let backend = Arc::new(
        ScriptedBackend::default().with("blank", vec![hit([None; 4], "https://d.example/")]),
    );
    let docs = source(backend, Arc::new(MemoryCache::default()));

    let resolved = docs.resolve("blank", None).await.unwrap();
    assert_eq!(resolved.outcome, Outcome::NotFound);
}

#[tokio::test]
async fn backend_failure_propagates() {
    let docs = source(Arc::new(FailingBackend), Arc::new(MemoryCache::default()));

    let err = docs.resolve("rate limit", None).await.unwrap_err();
    assert!(docsearch_core::error::is_error_code(&err, "connection_error"));
    assert!(docs.suggest("rate limit").await.is_err());
}
