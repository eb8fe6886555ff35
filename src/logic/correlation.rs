//! Correlation Assembly
//!
//! Second-pass judgment over the current incident population. The only
//! local work is the bucketing/serialization transform: incidents are
//! grouped strictly by agent tag, each bucket is joined detail text, and
//! the four buckets go out as one correlate call. All synthesis happens
//! remotely.

use crate::logic::analyst::{
    Analyst, AnalystError, CorrelationDigest, CorrelationJudgment, IncidentDigest,
};
use crate::models::incident::{AgentKind, Incident};

/// Serialize one agent's incidents to text, blank-line separated. Empty
/// bucket serializes to an empty string.
pub fn bucket(incidents: &[Incident], agent: AgentKind) -> String {
    incidents
        .iter()
        .filter(|incident| incident.agent == agent)
        .map(|incident| incident.details.to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Build the four-bucket digest, or `None` when there is nothing to
/// correlate.
pub fn assemble(incidents: &[Incident]) -> Option<CorrelationDigest> {
    if incidents.is_empty() {
        return None;
    }

    Some(CorrelationDigest {
        email_analysis: bucket(incidents, AgentKind::Email),
        url_risk_assessment: bucket(incidents, AgentKind::Url),
        malware_detection: bucket(incidents, AgentKind::Malware),
        fraud_pattern_analysis: bucket(incidents, AgentKind::Fraud),
    })
}

/// Correlate the current feed. `Ok(None)` means the feed was empty and no
/// remote call was issued.
pub async fn correlate(
    analyst: &dyn Analyst,
    incidents: &[Incident],
) -> Result<Option<CorrelationJudgment>, AnalystError> {
    match assemble(incidents) {
        Some(digest) => analyst.correlate(&digest).await.map(Some),
        None => Ok(None),
    }
}

/// Flatten the feed into summary digests: agent tag, confidence (1.0 when
/// the agent recorded none), and the judgment's reasoning text.
pub fn summary_digests(incidents: &[Incident]) -> Vec<IncidentDigest> {
    incidents
        .iter()
        .map(|incident| {
            let reasoning = incident
                .details
                .get("reason")
                .or_else(|| incident.details.get("explanation"))
                .and_then(|value| value.as_str())
                .unwrap_or(&incident.finding)
                .to_string();

            IncidentDigest {
                agent: incident.agent.as_str().to_string(),
                confidence_level: incident.confidence.unwrap_or(1.0),
                reasoning,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::models::incident::RiskLevel;

    fn incident(agent: AgentKind, details: serde_json::Value) -> Incident {
        Incident {
            id: Uuid::new_v4(),
            agent,
            risk_level: RiskLevel::High,
            confidence: None,
            finding: "finding".to_string(),
            timestamp: Utc::now(),
            details,
        }
    }

    #[test]
    fn test_empty_feed_assembles_to_none() {
        assert!(assemble(&[]).is_none());
    }

    #[test]
    fn test_buckets_are_strict_by_agent_tag() {
        let incidents = vec![
            incident(AgentKind::Url, json!({ "url": "http://bad.example" })),
            incident(AgentKind::Email, json!({ "reason": "spoofed sender" })),
        ];

        let digest = assemble(&incidents).unwrap();
        assert!(digest.email_analysis.contains("spoofed sender"));
        assert!(!digest.email_analysis.contains("bad.example"));
        assert!(digest.url_risk_assessment.contains("bad.example"));
        assert!(!digest.url_risk_assessment.contains("spoofed sender"));
    }

    #[test]
    fn test_empty_buckets_serialize_to_empty_strings() {
        let incidents = vec![incident(AgentKind::Fraud, json!({ "amount": 9999 }))];

        let digest = assemble(&incidents).unwrap();
        assert_eq!(digest.email_analysis, "");
        assert_eq!(digest.url_risk_assessment, "");
        assert_eq!(digest.malware_detection, "");
        assert!(digest.fraud_pattern_analysis.contains("9999"));
    }

    #[test]
    fn test_bucket_joins_with_blank_line() {
        let incidents = vec![
            incident(AgentKind::Email, json!({ "reason": "first" })),
            incident(AgentKind::Email, json!({ "reason": "second" })),
        ];

        let text = bucket(&incidents, AgentKind::Email);
        assert_eq!(text.matches("\n\n").count(), 1);
        assert!(text.contains("first"));
        assert!(text.contains("second"));
    }

    #[tokio::test]
    async fn test_empty_feed_never_issues_remote_call() {
        let analyst = crate::logic::analyst::testing::StubAnalyst::failing();

        let result = correlate(&analyst, &[]).await.unwrap();
        assert!(result.is_none());
        assert_eq!(analyst.call_count(), 0);
    }

    #[test]
    fn test_summary_digests_prefer_judgment_reasoning() {
        let incidents = vec![
            incident(AgentKind::Email, json!({ "reason": "spoofed sender" })),
            incident(AgentKind::Fraud, json!({ "explanation": "velocity anomaly" })),
            incident(AgentKind::Malware, json!({ "other": true })),
        ];

        let digests = summary_digests(&incidents);
        assert_eq!(digests[0].reasoning, "spoofed sender");
        assert_eq!(digests[1].reasoning, "velocity anomaly");
        assert_eq!(digests[2].reasoning, "finding");
        assert_eq!(digests[0].confidence_level, 1.0);
    }
}
