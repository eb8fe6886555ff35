//! Judgment Types
//!
//! The declared response shapes of the hosted classifiers. Field names are
//! camelCase on the wire because that is what the external contract emits;
//! nothing beyond these shapes is parsed.

use serde::{Deserialize, Serialize};

use crate::models::incident::RiskLevel;

// ============================================================================
// PER-KIND JUDGMENTS
// ============================================================================

/// The email classifier's native three-level scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailRiskLevel {
    #[serde(alias = "LOW", alias = "Low")]
    Low,
    #[serde(alias = "MEDIUM", alias = "Medium")]
    Medium,
    #[serde(alias = "HIGH", alias = "High")]
    High,
}

impl EmailRiskLevel {
    /// Explicit mapping into the unified scale.
    pub fn to_risk_level(self) -> RiskLevel {
        match self {
            EmailRiskLevel::Low => RiskLevel::Low,
            EmailRiskLevel::Medium => RiskLevel::Medium,
            EmailRiskLevel::High => RiskLevel::High,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailJudgment {
    pub is_phishing: bool,
    pub risk_level: EmailRiskLevel,
    pub reason: String,
    pub suggested_action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlJudgment {
    pub risk_level: RiskLevel,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudJudgment {
    pub is_fraudulent: bool,
    /// Likelihood of fraud in [0,1].
    pub confidence_score: f32,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MalwareJudgment {
    pub is_malicious: bool,
    pub risk_level: RiskLevel,
    pub reason: String,
    #[serde(default)]
    pub indicators: Vec<String>,
}

// ============================================================================
// SECOND-PASS JUDGMENTS
// ============================================================================

/// Per-agent-bucketed digest of the current incident feed. Empty buckets
/// serialize to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationDigest {
    pub email_analysis: String,
    pub url_risk_assessment: String,
    pub malware_detection: String,
    pub fraud_pattern_analysis: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationJudgment {
    pub is_incident: bool,
    pub severity: String,
    pub summary: String,
    pub recommendations: String,
}

/// One line of the feed digest submitted for narrative summarization.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentDigest {
    pub agent: String,
    pub confidence_level: f32,
    pub reasoning: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryJudgment {
    pub summary: String,
}
