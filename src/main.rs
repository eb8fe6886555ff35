//! Sentinel-Ops Backend Server
//!
//! JSON API behind the security-operations dashboard.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        SENTINEL-OPS                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌────────────────┐  ┌────────────────────┐  │
//! │  │  API      │  │ Analysis       │  │ Simulation Driver  │  │
//! │  │  Gateway  │  │ Agents         │  │ (Background Task)  │  │
//! │  │  (Axum)   │  │ Email/URL/     │  │                    │  │
//! │  │           │  │ Fraud/Malware  │  │                    │  │
//! │  └─────┬─────┘  └───────┬────────┘  └─────────┬──────────┘  │
//! │        └────────────────┼─────────────────────┘             │
//! │                         ▼                                   │
//! │        ┌────────────────────────────────┐                   │
//! │        │ Incident Store + Blocklist     │──► Document Store │
//! │        └────────────────────────────────┘    (optional)     │
//! │                         │                                   │
//! │                         ▼                                   │
//! │                 Hosted Analyst (LLM)                        │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod logic;
mod models;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::logic::analyst::{Analyst, GeminiAnalyst};
use crate::logic::blocklist::Blocklist;
use crate::logic::persistence::DocumentStore;
use crate::logic::simulation::SimulationDriver;
use crate::logic::store::IncidentStore;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sentinel_ops=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("Sentinel-Ops server starting...");
    tracing::info!("Environment: {}", config.environment);

    if !config.analyst_configured() {
        tracing::warn!("GEMINI_API_KEY not set - analysis requests will fail until configured");
    }

    // Optional document store: absent means memory-only mode
    let persistence = DocumentStore::from_config(&config).map(Arc::new);
    let (store, blocklist) = match &persistence {
        Some(persistence) => {
            tracing::info!("Document store configured: incidents and blocks are persisted");
            (
                IncidentStore::with_persistence(persistence.clone()),
                Blocklist::with_persistence(persistence.clone()),
            )
        }
        None => {
            tracing::info!("No document store configured: running memory-only");
            (IncidentStore::in_memory(), Blocklist::in_memory())
        }
    };

    let analyst: Arc<dyn Analyst> = Arc::new(GeminiAnalyst::new(&config));
    let simulation = SimulationDriver::new(config.simulation_interval_seconds);

    // Build application state
    let state = AppState {
        store,
        blocklist,
        analyst,
        simulation,
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: IncidentStore,
    pub blocklist: Blocklist,
    pub analyst: Arc<dyn Analyst>,
    pub simulation: SimulationDriver,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        // Analysis
        .route("/api/v1/analyze/email", post(handlers::analyze::email))
        .route("/api/v1/analyze/url", post(handlers::analyze::url))
        .route("/api/v1/analyze/fraud", post(handlers::analyze::fraud))
        .route("/api/v1/analyze/malware", post(handlers::analyze::malware))
        // Incident feed
        .route("/api/v1/incidents", get(handlers::incidents::list))
        .route("/api/v1/incidents", delete(handlers::incidents::clear))
        .route("/api/v1/incidents/stats", get(handlers::incidents::stats))
        .route("/api/v1/incidents/summary", post(handlers::incidents::summary))
        // Correlation
        .route("/api/v1/correlate", post(handlers::correlation::correlate))
        // Simulation
        .route("/api/v1/simulation/start", post(handlers::simulation::start))
        .route("/api/v1/simulation/stop", post(handlers::simulation::stop))
        .route("/api/v1/simulation/status", get(handlers::simulation::status))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
