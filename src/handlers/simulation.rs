//! Simulation control handlers

use axum::{extract::State, Json};

use crate::logic::simulation::SimulationStatus;
use crate::{AppError, AppResult, AppState};

/// Start the autonomous rotation
pub async fn start(State(state): State<AppState>) -> AppResult<Json<SimulationStatus>> {
    let started = state.simulation.start(
        state.analyst.clone(),
        state.store.clone(),
        state.blocklist.clone(),
    );
    if !started {
        return Err(AppError::SimulationAlreadyRunning);
    }
    Ok(Json(state.simulation.status()))
}

/// Stop the rotation (idempotent)
pub async fn stop(State(state): State<AppState>) -> Json<SimulationStatus> {
    state.simulation.stop();
    Json(state.simulation.status())
}

/// Current rotation status
pub async fn status(State(state): State<AppState>) -> Json<SimulationStatus> {
    Json(state.simulation.status())
}
