//! Fraud Pattern Agent
//!
//! Reviews transaction payloads for signs of fraud. The judgment carries no
//! native scale; the unified risk level derives from the confidence score,
//! and only fraudulent verdicts are reportable.

use serde::{Deserialize, Serialize};

use super::{details_with_input, AgentError};
use crate::logic::analyst::{Analyst, FraudJudgment};
use crate::logic::store::IncidentStore;
use crate::models::incident::{AgentKind, Incident, NewIncident, RiskLevel};

/// Confidence above this maps to Critical instead of High.
const CRITICAL_CONFIDENCE: f32 = 0.8;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudAnalysisRequest {
    pub transaction_data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudAnalysisReport {
    #[serde(flatten)]
    pub judgment: FraudJudgment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident: Option<Incident>,
}

pub async fn analyze(
    analyst: &dyn Analyst,
    store: &IncidentStore,
    request: &FraudAnalysisRequest,
) -> Result<FraudAnalysisReport, AgentError> {
    // Syntactic check only: the payload must parse as JSON.
    let parsed: Result<serde_json::Value, _> = serde_json::from_str(&request.transaction_data);
    if parsed.is_err() {
        return Err(AgentError::Validation(
            "transactionData: Transaction data must be valid JSON.".to_string(),
        ));
    }

    let judgment = analyst.analyze_transaction(&request.transaction_data).await?;

    let mut incident = None;
    if judgment.is_fraudulent {
        let risk_level = if judgment.confidence_score > CRITICAL_CONFIDENCE {
            RiskLevel::Critical
        } else {
            RiskLevel::High
        };

        incident = Some(
            store
                .add(NewIncident {
                    agent: AgentKind::Fraud,
                    risk_level,
                    confidence: Some(judgment.confidence_score),
                    finding: "Potential fraud detected in transaction".to_string(),
                    details: details_with_input(
                        &judgment,
                        "transactionData",
                        serde_json::Value::String(request.transaction_data.clone()),
                    ),
                })
                .await?,
        );
    }

    Ok(FraudAnalysisReport { judgment, incident })
}
