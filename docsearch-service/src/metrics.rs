//! Request counters and the GET /metrics handler.

use crate::state::SharedState;
use axum::extract::State;
use axum::Json;
use docsearch_core::Outcome;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default)]
pub struct Metrics {
    pub suggest_count: AtomicU64,
    pub resolve_count: AtomicU64,
    pub staged_hits: AtomicU64,
    pub searches: AtomicU64,
    pub not_found: AtomicU64,
    pub backend_errors: AtomicU64,
    pub total_suggest_ms: AtomicU64,
    pub total_resolve_ms: AtomicU64,
}

impl Metrics {
    pub fn record_outcome(&self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::Staged => &self.staged_hits,
            Outcome::Searched => &self.searches,
            Outcome::NotFound => &self.not_found,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub suggestions: u64,
    pub resolutions: u64,
    pub staged_hit_rate: f64,
    pub staged_hits: u64,
    pub searches: u64,
    pub not_found: u64,
    pub backend_errors: u64,
    pub avg_suggest_ms: u64,
    pub avg_resolve_ms: u64,
}

fn avg(total: u64, count: u64) -> u64 {
    if count == 0 {
        0
    } else {
        total / count
    }
}

pub async fn metrics(State(state): State<SharedState>) -> Json<MetricsResponse> {
    let m = &state.metrics;
    let suggestions = m.suggest_count.load(Ordering::Relaxed);
    let resolutions = m.resolve_count.load(Ordering::Relaxed);
    let staged_hits = m.staged_hits.load(Ordering::Relaxed);

    let staged_hit_rate = if resolutions == 0 {
        0.0
    } else {
        staged_hits as f64 / resolutions as f64
    };

    Json(MetricsResponse {
        suggestions,
        resolutions,
        staged_hit_rate,
        staged_hits,
        searches: m.searches.load(Ordering::Relaxed),
        not_found: m.not_found.load(Ordering::Relaxed),
        backend_errors: m.backend_errors.load(Ordering::Relaxed),
        avg_suggest_ms: avg(m.total_suggest_ms.load(Ordering::Relaxed), suggestions),
        avg_resolve_ms: avg(m.total_resolve_ms.load(Ordering::Relaxed), resolutions),
    })
}
