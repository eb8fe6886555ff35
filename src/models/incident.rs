//! Incident records
//!
//! The canonical aggregate record produced by the analysis agents. Each
//! classifier speaks its own native scale; everything is mapped into the
//! single ordered [`RiskLevel`] before an incident is recorded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// AGENT KIND
// ============================================================================

/// Origin classifier of an incident. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentKind {
    Email,
    #[serde(rename = "URL")]
    Url,
    Malware,
    Fraud,
}

impl AgentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Email => "Email",
            AgentKind::Url => "URL",
            AgentKind::Malware => "Malware",
            AgentKind::Fraud => "Fraud",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Unified ordered severity scale.
///
/// The uppercase aliases accept the three-level scale some classifiers emit
/// (`LOW`/`MEDIUM`/`HIGH`); the mapping into this scale happens at
/// deserialization, so no other vocabulary leaks past the analyst boundary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[serde(alias = "INFO", alias = "Info")]
    Info,
    #[serde(alias = "LOW", alias = "Low")]
    Low,
    #[serde(alias = "MEDIUM", alias = "Medium")]
    Medium,
    #[serde(alias = "HIGH", alias = "High")]
    High,
    #[serde(alias = "CRITICAL", alias = "Critical")]
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Info => "info",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }

    /// Reportable threshold: Medium and above is promoted to an incident.
    /// One policy for every agent.
    pub fn is_reportable(&self) -> bool {
        *self >= RiskLevel::Medium
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// INCIDENT
// ============================================================================

/// A recorded output of one classification call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    pub id: Uuid,
    pub agent: AgentKind,
    pub risk_level: RiskLevel,
    /// Present only for agents whose judgment carries a score in [0,1].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    pub finding: String,
    /// Assigned by the store at insertion, never mutated afterward.
    pub timestamp: DateTime<Utc>,
    /// The entire raw classifier response plus the analyzed input. Shape is
    /// agent-specific and not validated against any shared schema.
    pub details: serde_json::Value,
}

/// What an agent hands to the store: an incident minus the store-assigned
/// `id` and `timestamp`.
#[derive(Debug, Clone)]
pub struct NewIncident {
    pub agent: AgentKind,
    pub risk_level: RiskLevel,
    pub confidence: Option<f32>,
    pub finding: String,
    pub details: serde_json::Value,
}

/// Per-risk-level counts for the overview tiles.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct IncidentStats {
    pub total: usize,
    pub info: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

// ============================================================================
// TESTS
// ============================================================================
