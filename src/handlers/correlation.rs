//! Correlation handler

use axum::{extract::State, Json};

use crate::logic::analyst::CorrelationJudgment;
use crate::logic::correlation;
use crate::{AppError, AppResult, AppState};

/// Correlate the current incident feed. Refuses when the feed is empty.
pub async fn correlate(State(state): State<AppState>) -> AppResult<Json<CorrelationJudgment>> {
    let incidents = state.store.list();

    let judgment = correlation::correlate(state.analyst.as_ref(), &incidents)
        .await?
        .ok_or_else(|| {
            AppError::EmptyFeed("Nothing to correlate: the incident feed is empty".to_string())
        })?;

    Ok(Json(judgment))
}
