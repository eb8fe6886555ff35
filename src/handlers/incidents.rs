//! Incident feed handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::logic::analyst::SummaryJudgment;
use crate::logic::correlation;
use crate::models::incident::{Incident, IncidentStats};
use crate::{AppError, AppResult, AppState};

/// List the incident feed, newest first
pub async fn list(State(state): State<AppState>) -> Json<Vec<Incident>> {
    Json(state.store.list())
}

/// Per-risk-level counts for the overview tiles
pub async fn stats(State(state): State<AppState>) -> Json<IncidentStats> {
    Json(state.store.stats())
}

/// Clear the feed. Local projection only: persisted records are append-only
/// and are not deleted.
pub async fn clear(State(state): State<AppState>) -> StatusCode {
    state.store.clear();
    StatusCode::NO_CONTENT
}

/// Narrative summary of the current feed
pub async fn summary(State(state): State<AppState>) -> AppResult<Json<SummaryJudgment>> {
    let incidents = state.store.list();
    if incidents.is_empty() {
        return Err(AppError::EmptyFeed(
            "Nothing to summarize: the incident feed is empty".to_string(),
        ));
    }

    let digests = correlation::summary_digests(&incidents);
    let judgment = state.analyst.summarize(&digests).await?;
    Ok(Json(judgment))
}
