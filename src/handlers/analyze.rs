//! Analysis handlers
//!
//! One endpoint per analysis kind. Handlers stay thin: deserialize,
//! delegate to the agent, convert agent failures into user-visible notices.

use axum::{extract::State, Json};

use crate::logic::agents::{email as email_agent, fraud as fraud_agent, malware as malware_agent, url as url_agent};
use crate::{AppResult, AppState};

/// Analyze pasted email content
pub async fn email(
    State(state): State<AppState>,
    Json(request): Json<email_agent::EmailAnalysisRequest>,
) -> AppResult<Json<email_agent::EmailAnalysisReport>> {
    let report = email_agent::analyze(state.analyst.as_ref(), &state.store, &request).await?;
    Ok(Json(report))
}

/// Assess a URL
pub async fn url(
    State(state): State<AppState>,
    Json(request): Json<url_agent::UrlAnalysisRequest>,
) -> AppResult<Json<url_agent::UrlAnalysisReport>> {
    let report = url_agent::assess(
        state.analyst.as_ref(),
        &state.store,
        &state.blocklist,
        &request,
    )
    .await?;
    Ok(Json(report))
}

/// Analyze a transaction payload
pub async fn fraud(
    State(state): State<AppState>,
    Json(request): Json<fraud_agent::FraudAnalysisRequest>,
) -> AppResult<Json<fraud_agent::FraudAnalysisReport>> {
    let report = fraud_agent::analyze(state.analyst.as_ref(), &state.store, &request).await?;
    Ok(Json(report))
}

/// Scan an uploaded file
pub async fn malware(
    State(state): State<AppState>,
    Json(request): Json<malware_agent::MalwareScanRequest>,
) -> AppResult<Json<malware_agent::MalwareScanReport>> {
    let report = malware_agent::scan(state.analyst.as_ref(), &state.store, &request).await?;
    Ok(Json(report))
}
