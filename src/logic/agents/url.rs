//! URL Risk Agent
//!
//! Assesses a URL for malicious domains, suspicious redirects, and unsafe
//! content. High-risk results trigger a second, explicit step: a blocklist
//! append whose outcome is reported independently of the judgment and of
//! any recorded incident.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{details_with_input, AgentError};
use crate::logic::analyst::{Analyst, UrlJudgment};
use crate::logic::blocklist::Blocklist;
use crate::logic::store::IncidentStore;
use crate::models::incident::{AgentKind, Incident, NewIncident, RiskLevel};

/// Block threshold: High and above goes to the blocklist.
const BLOCK_THRESHOLD: RiskLevel = RiskLevel::High;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UrlAnalysisRequest {
    #[validate(url(message = "Please enter a valid URL."))]
    pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlAnalysisReport {
    #[serde(flatten)]
    pub judgment: UrlJudgment,
    /// Outcome of the blocklist append only; independent of the incident.
    pub is_blocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident: Option<Incident>,
}

pub async fn assess(
    analyst: &dyn Analyst,
    store: &IncidentStore,
    blocklist: &Blocklist,
    request: &UrlAnalysisRequest,
) -> Result<UrlAnalysisReport, AgentError> {
    request.validate()?;
    let url = request.url.trim();

    let judgment = analyst.assess_url(url).await?;
    let risk_level = judgment.risk_level;

    let mut incident = None;
    if risk_level.is_reportable() {
        incident = Some(
            store
                .add(NewIncident {
                    agent: AgentKind::Url,
                    risk_level,
                    confidence: None,
                    finding: "Risky URL detected".to_string(),
                    details: details_with_input(
                        &judgment,
                        "url",
                        serde_json::Value::String(url.to_string()),
                    ),
                })
                .await?,
        );
    }

    let mut is_blocked = false;
    if risk_level >= BLOCK_THRESHOLD {
        match blocklist.block(url).await {
            Ok(()) => is_blocked = true,
            Err(e) => tracing::warn!("Blocklist append failed for {}: {}", url, e),
        }
    }

    Ok(UrlAnalysisReport { judgment, is_blocked, incident })
}
