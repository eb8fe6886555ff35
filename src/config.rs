//! Configuration module

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Hosted analyst (LLM) API base URL
    pub analyst_base_url: String,

    /// Hosted analyst API key; absent means analysis requests fail until set
    pub analyst_api_key: Option<String>,

    /// Analyst model name
    pub analyst_model: String,

    /// Analyst request timeout in seconds
    pub analyst_timeout_seconds: u64,

    /// Document store base URL; absent means memory-only mode
    pub doc_store_url: Option<String>,

    /// Document store API key
    pub doc_store_api_key: Option<String>,

    /// Seconds between simulation ticks
    pub simulation_interval_seconds: u64,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            analyst_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string()),

            analyst_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),

            analyst_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),

            analyst_timeout_seconds: env::var("GEMINI_TIMEOUT_SECONDS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(60),

            doc_store_url: env::var("DOC_STORE_URL").ok().filter(|u| !u.is_empty()),

            doc_store_api_key: env::var("DOC_STORE_API_KEY").ok().filter(|k| !k.is_empty()),

            simulation_interval_seconds: env::var("SIMULATION_INTERVAL_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(15),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Check if the hosted analyst is usable
    pub fn analyst_configured(&self) -> bool {
        self.analyst_api_key.is_some()
    }
}
