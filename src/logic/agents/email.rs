//! Email Analysis Agent
//!
//! Scans pasted email content (and optional base64 attachments) for
//! phishing, scams, and malicious links.

use base64::Engine;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{details_with_input, AgentError};
use crate::logic::analyst::{Analyst, EmailJudgment};
use crate::logic::store::IncidentStore;
use crate::models::incident::{AgentKind, Incident, NewIncident};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmailAnalysisRequest {
    #[validate(length(min = 50, message = "Email content must be at least 50 characters."))]
    pub email_content: String,

    #[serde(default)]
    pub attachments: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAnalysisReport {
    #[serde(flatten)]
    pub judgment: EmailJudgment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident: Option<Incident>,
}

pub async fn analyze(
    analyst: &dyn Analyst,
    store: &IncidentStore,
    request: &EmailAnalysisRequest,
) -> Result<EmailAnalysisReport, AgentError> {
    request.validate()?;
    for attachment in &request.attachments {
        if base64::engine::general_purpose::STANDARD.decode(attachment).is_err() {
            return Err(AgentError::Validation(
                "attachments: Attachments must be base64 encoded.".to_string(),
            ));
        }
    }

    let judgment = analyst
        .analyze_email(&request.email_content, &request.attachments)
        .await?;

    let risk_level = judgment.risk_level.to_risk_level();
    let mut incident = None;

    if risk_level.is_reportable() {
        let finding = if judgment.is_phishing {
            "Phishing attempt detected"
        } else {
            "Suspicious email content"
        };

        incident = Some(
            store
                .add(NewIncident {
                    agent: AgentKind::Email,
                    risk_level,
                    confidence: None,
                    finding: finding.to_string(),
                    details: details_with_input(
                        &judgment,
                        "emailContent",
                        serde_json::Value::String(request.email_content.clone()),
                    ),
                })
                .await?,
        );
    }

    Ok(EmailAnalysisReport { judgment, incident })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::analyst::testing::{phishing_email_judgment, StubAnalyst};
    use crate::logic::analyst::EmailRiskLevel;
    use crate::models::incident::RiskLevel;

    fn request(content: &str) -> EmailAnalysisRequest {
        EmailAnalysisRequest {
            email_content: content.to_string(),
            attachments: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_49_characters_rejected_before_any_remote_call() {
        let analyst = StubAnalyst::with_email(phishing_email_judgment(EmailRiskLevel::High));
        let store = IncidentStore::in_memory();
        let short = "x".repeat(49);

        let result = analyze(&analyst, &store, &request(&short)).await;
        assert!(matches!(result, Err(AgentError::Validation(_))));
        assert_eq!(analyst.call_count(), 0);
        assert!(store.list().is_empty());
    }

    #[tokio::test]
    async fn test_50_characters_pass_validation() {
        let analyst = StubAnalyst::with_email(phishing_email_judgment(EmailRiskLevel::High));
        let store = IncidentStore::in_memory();
        let content = "x".repeat(50);

        let report = analyze(&analyst, &store, &request(&content)).await.unwrap();
        assert_eq!(analyst.call_count(), 1);
        assert!(report.incident.is_some());
    }

    #[tokio::test]
    async fn test_reportable_judgment_records_incident_at_head() {
        let analyst = StubAnalyst::with_email(phishing_email_judgment(EmailRiskLevel::Medium));
        let store = IncidentStore::in_memory();
        let content = "From: spoofed@bank.example\nPlease verify your account now.";

        let report = analyze(&analyst, &store, &request(content)).await.unwrap();

        let incident = report.incident.expect("medium risk is reportable");
        assert_eq!(incident.agent, AgentKind::Email);
        assert_eq!(incident.risk_level, RiskLevel::Medium);
        assert_eq!(incident.finding, "Phishing attempt detected");
        assert_eq!(store.list()[0].id, incident.id);
        // Details carry the raw judgment plus the analyzed input.
        assert_eq!(incident.details["emailContent"], content);
        assert_eq!(incident.details["isPhishing"], true);
    }

    #[tokio::test]
    async fn test_low_risk_is_not_reportable() {
        let analyst = StubAnalyst::with_email(EmailJudgment {
            is_phishing: false,
            risk_level: EmailRiskLevel::Low,
            reason: "Routine newsletter".to_string(),
            suggested_action: "No action needed".to_string(),
        });
        let store = IncidentStore::in_memory();
        let content = "Hello team, attached is the agenda for Monday's meeting.";

        let report = analyze(&analyst, &store, &request(content)).await.unwrap();
        assert!(report.incident.is_none());
        assert!(store.list().is_empty());
    }

    #[tokio::test]
    async fn test_remote_failure_leaves_feed_unchanged() {
        let analyst = StubAnalyst::failing();
        let store = IncidentStore::in_memory();
        store
            .add(NewIncident {
                agent: AgentKind::Url,
                risk_level: RiskLevel::High,
                confidence: None,
                finding: "existing".to_string(),
                details: serde_json::json!({}),
            })
            .await
            .unwrap();
        let before: Vec<_> = store.list().iter().map(|i| i.id).collect();

        let content = "From: someone@example.com\nLong enough body to pass validation.";
        let result = analyze(&analyst, &store, &request(content)).await;

        assert!(matches!(result, Err(AgentError::Analyst(_))));
        let after: Vec<_> = store.list().iter().map(|i| i.id).collect();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_invalid_attachment_rejected_locally() {
        let analyst = StubAnalyst::with_email(phishing_email_judgment(EmailRiskLevel::High));
        let store = IncidentStore::in_memory();
        let request = EmailAnalysisRequest {
            email_content: "x".repeat(60),
            attachments: vec!["not@@base64!!".to_string()],
        };

        let result = analyze(&analyst, &store, &request).await;
        assert!(matches!(result, Err(AgentError::Validation(_))));
        assert_eq!(analyst.call_count(), 0);
    }
}
