//! Document Store Client
//!
//! HTTP client for the hosted document store. Writes are append-only:
//! incident records and blocklist entries are POSTed to their collections
//! and never updated or deleted from here. The store's own subscription
//! mechanism is an external concern; the in-memory feed is the local
//! projection.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::models::incident::Incident;

const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Document store returned HTTP {0}")]
    Http(u16),
}

/// Append-only client for the incident and blocklist collections.
pub struct DocumentStore {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct BlocklistEntry<'a> {
    url: &'a str,
    blocked_at: i64,
}

impl DocumentStore {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, base_url, api_key }
    }

    /// Build a client from configuration. `None` means memory-only mode.
    pub fn from_config(config: &Config) -> Option<Self> {
        config
            .doc_store_url
            .as_ref()
            .map(|url| Self::new(url.clone(), config.doc_store_api_key.clone()))
    }

    pub async fn append_incident(&self, incident: &Incident) -> Result<(), PersistenceError> {
        self.append("incidents", incident).await
    }

    pub async fn append_blocklist_entry(&self, url: &str) -> Result<(), PersistenceError> {
        let entry = BlocklistEntry {
            url,
            blocked_at: chrono::Utc::now().timestamp(),
        };
        self.append("blocklist", &entry).await
    }

    async fn append<T: Serialize>(
        &self,
        collection: &str,
        record: &T,
    ) -> Result<(), PersistenceError> {
        let url = format!("{}/v1/collections/{}/documents", self.base_url, collection);

        let mut request = self.client.post(&url).json(record);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request
            .send()
            .await
            .map_err(|e| PersistenceError::Network(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(PersistenceError::Http(response.status().as_u16()))
        }
    }
}
