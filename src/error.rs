//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::logic::agents::AgentError;
use crate::logic::analyst::AnalystError;
use crate::logic::store::StoreError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Validation errors (rejected before any remote call)
    Validation(String),

    // Remote classification failure (terminal, never retried)
    Analyst(AnalystError),

    // Document store unreachable during a dependent mutation
    PersistenceUnavailable(String),

    // Empty-feed guards (correlation / summary)
    EmptyFeed(String),

    // Simulation driver already running
    SimulationAlreadyRunning,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Analyst(AnalystError::NotConfigured) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Analyst API key not configured".to_string(),
            ),
            AppError::Analyst(err) => {
                tracing::error!("Analyst error: {}", err);
                (
                    StatusCode::BAD_GATEWAY,
                    "Could not complete the analysis".to_string(),
                )
            }
            AppError::PersistenceUnavailable(msg) => {
                tracing::error!("Document store error: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Document store unavailable; incident was not recorded".to_string(),
                )
            }
            AppError::EmptyFeed(msg) => (StatusCode::CONFLICT, msg),
            AppError::SimulationAlreadyRunning => (
                StatusCode::CONFLICT,
                "Simulation is already running".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<AnalystError> for AppError {
    fn from(err: AnalystError) -> Self {
        AppError::Analyst(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::PersistenceUnavailable(msg) => AppError::PersistenceUnavailable(msg),
        }
    }
}

impl From<AgentError> for AppError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::Validation(msg) => AppError::Validation(msg),
            AgentError::Analyst(err) => AppError::Analyst(err),
            AgentError::Store(err) => err.into(),
        }
    }
}
