//! Incident Store
//!
//! Holds the ordered incident feed, newest first, behind an injectable
//! handle. Every `add` prepends an independently-generated record, so
//! concurrent completions never corrupt the list; only their relative order
//! is timing-dependent (list order is completion order, not submission
//! order).
//!
//! When a document store is attached, `add` persists the record BEFORE
//! updating the local projection: a collaborator failure leaves the local
//! list untouched and surfaces as [`StoreError::PersistenceUnavailable`].
//! `clear` only empties the local projection; persisted records are
//! append-only and are never deleted from here.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use thiserror::Error;
use uuid::Uuid;

use crate::logic::persistence::DocumentStore;
use crate::models::incident::{Incident, IncidentStats, NewIncident, RiskLevel};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Persistence unavailable: {0}")]
    PersistenceUnavailable(String),
}

#[derive(Clone)]
pub struct IncidentStore {
    incidents: Arc<Mutex<Vec<Incident>>>,
    persistence: Option<Arc<DocumentStore>>,
}

impl IncidentStore {
    pub fn in_memory() -> Self {
        Self {
            incidents: Arc::new(Mutex::new(Vec::new())),
            persistence: None,
        }
    }

    pub fn with_persistence(persistence: Arc<DocumentStore>) -> Self {
        Self {
            incidents: Arc::new(Mutex::new(Vec::new())),
            persistence: Some(persistence),
        }
    }

    /// Assign id and timestamp, persist if configured, then prepend.
    pub async fn add(&self, new: NewIncident) -> Result<Incident, StoreError> {
        let incident = Incident {
            id: Uuid::new_v4(),
            agent: new.agent,
            risk_level: new.risk_level,
            confidence: new.confidence,
            finding: new.finding,
            timestamp: Utc::now(),
            details: new.details,
        };

        if let Some(persistence) = &self.persistence {
            persistence
                .append_incident(&incident)
                .await
                .map_err(|e| StoreError::PersistenceUnavailable(e.to_string()))?;
        }

        tracing::info!(
            "Incident recorded: {} / {} ({})",
            incident.agent,
            incident.finding,
            incident.risk_level
        );

        self.incidents.lock().insert(0, incident.clone());
        Ok(incident)
    }

    /// Snapshot of the feed, newest first.
    pub fn list(&self) -> Vec<Incident> {
        self.incidents.lock().clone()
    }

    /// Empty the local projection. Persisted records are not touched.
    pub fn clear(&self) {
        self.incidents.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.incidents.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.incidents.lock().is_empty()
    }

    pub fn stats(&self) -> IncidentStats {
        let incidents = self.incidents.lock();
        let mut stats = IncidentStats {
            total: incidents.len(),
            ..IncidentStats::default()
        };
        for incident in incidents.iter() {
            match incident.risk_level {
                RiskLevel::Info => stats.info += 1,
                RiskLevel::Low => stats.low += 1,
                RiskLevel::Medium => stats.medium += 1,
                RiskLevel::High => stats.high += 1,
                RiskLevel::Critical => stats.critical += 1,
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::incident::AgentKind;

    fn sample(agent: AgentKind, risk_level: RiskLevel) -> NewIncident {
        NewIncident {
            agent,
            risk_level,
            confidence: None,
            finding: "test finding".to_string(),
            details: serde_json::json!({ "reason": "test" }),
        }
    }

    #[tokio::test]
    async fn test_add_assigns_unique_ids_and_grows_by_one() {
        let store = IncidentStore::in_memory();
        for _ in 0..10 {
            store.add(sample(AgentKind::Email, RiskLevel::Medium)).await.unwrap();
        }

        let incidents = store.list();
        assert_eq!(incidents.len(), 10);

        let mut ids: Vec<_> = incidents.iter().map(|i| i.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[tokio::test]
    async fn test_add_prepends() {
        let store = IncidentStore::in_memory();
        store.add(sample(AgentKind::Email, RiskLevel::Medium)).await.unwrap();
        let second = store.add(sample(AgentKind::Url, RiskLevel::High)).await.unwrap();

        let incidents = store.list();
        assert_eq!(incidents[0].id, second.id);
        assert_eq!(incidents[0].agent, AgentKind::Url);
        assert_eq!(incidents[1].agent, AgentKind::Email);
    }

    #[tokio::test]
    async fn test_clear_empties_regardless_of_contents() {
        let store = IncidentStore::in_memory();
        store.clear();
        assert!(store.list().is_empty());

        for _ in 0..3 {
            store.add(sample(AgentKind::Fraud, RiskLevel::Critical)).await.unwrap();
        }
        store.clear();
        assert!(store.list().is_empty());
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_list_order_is_completion_order() {
        // Two adds completing in the opposite order of "submission": the
        // later completion sits at index 0.
        let store = IncidentStore::in_memory();
        let first_done = store.add(sample(AgentKind::Url, RiskLevel::Medium)).await.unwrap();
        let second_done = store.add(sample(AgentKind::Email, RiskLevel::High)).await.unwrap();

        let incidents = store.list();
        assert_eq!(incidents[0].id, second_done.id);
        assert_eq!(incidents[1].id, first_done.id);
        assert!(incidents[0].timestamp >= incidents[1].timestamp);
    }

    #[tokio::test]
    async fn test_stats_counts_by_risk_level() {
        let store = IncidentStore::in_memory();
        store.add(sample(AgentKind::Email, RiskLevel::Medium)).await.unwrap();
        store.add(sample(AgentKind::Url, RiskLevel::High)).await.unwrap();
        store.add(sample(AgentKind::Fraud, RiskLevel::High)).await.unwrap();

        let stats = store.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.medium, 1);
        assert_eq!(stats.high, 2);
        assert_eq!(stats.critical, 0);
    }

    #[tokio::test]
    async fn test_persistence_failure_leaves_list_unchanged() {
        // Unreachable document store: the remote append fails and the local
        // projection must not grow.
        let dead = Arc::new(crate::logic::persistence::DocumentStore::new(
            "http://127.0.0.1:9".to_string(),
            None,
        ));
        let store = IncidentStore::with_persistence(dead);

        let result = store.add(sample(AgentKind::Email, RiskLevel::High)).await;
        assert!(matches!(result, Err(StoreError::PersistenceUnavailable(_))));
        assert!(store.list().is_empty());
    }
}
