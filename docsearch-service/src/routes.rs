use crate::error::AppError;
use crate::state::SharedState;
use axum::extract::{Path, State};
use axum::Json;
use docsearch_core::{DocsearchError, Outcome, ResponseMessage, Suggestion};
use serde::{Deserialize, Serialize};
use std::sync::atomic::Ordering;
use std::time::Instant;
use tracing::info;

/// Option name whose autocomplete produces suggestions.
const QUERY_OPTION: &str = "query";

fn default_focused() -> String {
    QUERY_OPTION.to_string()
}

// POST /sources/{name}/autocomplete
#[derive(Debug, Deserialize)]
pub struct AutocompleteRequest {
    #[serde(default)]
    pub query: Option<String>,
    /// Option the user is currently typing into.
    #[serde(default = "default_focused")]
    pub focused: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AutocompleteResponse {
    pub choices: Vec<Suggestion>,
}

pub async fn autocomplete(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    Json(req): Json<AutocompleteRequest>,
) -> Result<Json<AutocompleteResponse>, AppError> {
    let start = Instant::now();
    let entry = state
        .source(&name)
        .ok_or_else(|| AppError::not_found("source"))?;

    let query = req.query.unwrap_or_default();
    if req.focused != QUERY_OPTION || query.trim().is_empty() {
        return Ok(Json(AutocompleteResponse {
            choices: Vec::new(),
        }));
    }

    state.metrics.suggest_count.fetch_add(1, Ordering::Relaxed);
    let choices = entry
        .source
        .suggest(&query)
        .await
        .inspect_err(|err| note_backend_error(&state, err))?;

    let duration_ms = start.elapsed().as_millis() as u64;
    state
        .metrics
        .total_suggest_ms
        .fetch_add(duration_ms, Ordering::Relaxed);
    info!(
        source = %name,
        choices = choices.len(),
        duration_ms,
        "POST /autocomplete"
    );

    Ok(Json(AutocompleteResponse { choices }))
}

// POST /sources/{name}/resolve
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub query: String,
    /// User to mention alongside the result.
    #[serde(default)]
    pub target: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    #[serde(flatten)]
    pub message: ResponseMessage,
    pub outcome: Outcome,
}

pub async fn resolve(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    Json(req): Json<ResolveRequest>,
) -> Result<Json<ResolveResponse>, AppError> {
    let start = Instant::now();
    let entry = state
        .source(&name)
        .ok_or_else(|| AppError::not_found("source"))?;

    state.metrics.resolve_count.fetch_add(1, Ordering::Relaxed);
    let target = req.target.as_deref().filter(|t| !t.is_empty());
    let resolved = entry
        .source
        .resolve(&req.query, target)
        .await
        .inspect_err(|err| note_backend_error(&state, err))?;
    state.metrics.record_outcome(resolved.outcome);

    let duration_ms = start.elapsed().as_millis() as u64;
    state
        .metrics
        .total_resolve_ms
        .fetch_add(duration_ms, Ordering::Relaxed);
    info!(
        source = %name,
        outcome = ?resolved.outcome,
        duration_ms,
        "POST /resolve"
    );

    Ok(Json(ResolveResponse {
        message: resolved.message,
        outcome: resolved.outcome,
    }))
}

fn note_backend_error(state: &SharedState, err: &DocsearchError) {
    if matches!(err, DocsearchError::Backend { .. }) {
        state.metrics.backend_errors.fetch_add(1, Ordering::Relaxed);
    }
}

// GET /sources
#[derive(Debug, Serialize, Deserialize)]
pub struct SourceSummary {
    pub name: String,
    pub description: String,
    pub namespace: String,
    pub title: String,
    pub root_url: String,
}

pub async fn list_sources(State(state): State<SharedState>) -> Json<Vec<SourceSummary>> {
    Json(
        state
            .sources()
            .map(|entry| SourceSummary {
                name: entry.config.name.clone(),
                description: entry.config.description.clone(),
                namespace: entry.config.namespace.to_string(),
                title: entry.config.title.clone(),
                root_url: entry.config.root_url.clone(),
            })
            .collect(),
    )
}

// GET /status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub service: String,
    pub sources: usize,
}

pub async fn status(State(state): State<SharedState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        service: "docsearch-service".to_string(),
        sources: state.sources().count(),
    })
}
