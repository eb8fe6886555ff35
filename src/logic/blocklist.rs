//! URL Blocklist
//!
//! Explicit side-effect channel for high-risk URLs: classification first,
//! then a separate append here when the judgment crosses the block
//! threshold. The local set is the in-memory projection; when a document
//! store is configured the entry is appended there first, and a failed
//! append propagates so the caller can report `is_blocked = false` without
//! touching the classification result.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use crate::logic::persistence::DocumentStore;

#[derive(Debug, Error)]
pub enum BlocklistError {
    #[error("Blocklist append failed: {0}")]
    AppendFailed(String),
}

#[derive(Clone)]
pub struct Blocklist {
    blocked: Arc<RwLock<HashSet<String>>>,
    persistence: Option<Arc<DocumentStore>>,
}

impl Blocklist {
    pub fn in_memory() -> Self {
        Self {
            blocked: Arc::new(RwLock::new(HashSet::new())),
            persistence: None,
        }
    }

    pub fn with_persistence(persistence: Arc<DocumentStore>) -> Self {
        Self {
            blocked: Arc::new(RwLock::new(HashSet::new())),
            persistence: Some(persistence),
        }
    }

    /// Append a URL to the blocklist.
    pub async fn block(&self, url: &str) -> Result<(), BlocklistError> {
        if let Some(persistence) = &self.persistence {
            persistence
                .append_blocklist_entry(url)
                .await
                .map_err(|e| BlocklistError::AppendFailed(e.to_string()))?;
        }

        self.blocked.write().insert(url.to_string());
        tracing::warn!("URL added to blocklist: {}", url);
        Ok(())
    }

    pub fn is_blocked(&self, url: &str) -> bool {
        self.blocked.read().contains(url)
    }

    pub fn len(&self) -> usize {
        self.blocked.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocked.read().is_empty()
    }
}
