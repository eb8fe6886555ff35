//! Malware Scan Agent
//!
//! Reviews an uploaded file (base64 payload) for malicious indicators. The
//! payload itself is never recorded on the incident; details carry the
//! judgment and the file name only.

use base64::Engine;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{details_with_input, AgentError};
use crate::logic::analyst::{Analyst, MalwareJudgment};
use crate::logic::store::IncidentStore;
use crate::models::incident::{AgentKind, Incident, NewIncident};

/// Upper bound on the decoded payload accepted for a scan.
const MAX_SCAN_BYTES: usize = 4 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MalwareScanRequest {
    #[validate(length(min = 1, message = "File name is required."))]
    pub file_name: String,

    pub content_base64: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MalwareScanReport {
    #[serde(flatten)]
    pub judgment: MalwareJudgment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident: Option<Incident>,
}

pub async fn scan(
    analyst: &dyn Analyst,
    store: &IncidentStore,
    request: &MalwareScanRequest,
) -> Result<MalwareScanReport, AgentError> {
    request.validate()?;

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(&request.content_base64)
        .map_err(|_| {
            AgentError::Validation(
                "contentBase64: File content must be base64 encoded.".to_string(),
            )
        })?;
    if decoded.len() > MAX_SCAN_BYTES {
        return Err(AgentError::Validation(format!(
            "contentBase64: File exceeds the {} MB scan limit.",
            MAX_SCAN_BYTES / 1024 / 1024
        )));
    }

    let judgment = analyst
        .scan_file(&request.file_name, &request.content_base64)
        .await?;

    let risk_level = judgment.risk_level;
    let mut incident = None;

    if risk_level.is_reportable() {
        let finding = if judgment.is_malicious {
            "Malicious file detected"
        } else {
            "Suspicious file flagged"
        };

        incident = Some(
            store
                .add(NewIncident {
                    agent: AgentKind::Malware,
                    risk_level,
                    confidence: None,
                    finding: finding.to_string(),
                    details: details_with_input(
                        &judgment,
                        "fileName",
                        serde_json::Value::String(request.file_name.clone()),
                    ),
                })
                .await?,
        );
    }

    Ok(MalwareScanReport { judgment, incident })
}
