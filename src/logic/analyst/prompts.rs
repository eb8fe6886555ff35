//! Prompt Templates
//!
//! One instruction template per analysis kind. Each ends with the exact JSON
//! shape the classifier must return; the client requests a JSON response
//! mime type so the judgment parses directly.

use super::types::{CorrelationDigest, IncidentDigest};

pub fn email_analysis(email_content: &str, attachments: &[String]) -> String {
    let attachment_section = if attachments.is_empty() {
        String::new()
    } else {
        format!(
            "\nAttachments ({} total, base64 encoded):\n{}\n",
            attachments.len(),
            attachments.join("\n")
        )
    };

    format!(
        "You are a cybersecurity expert specializing in email analysis. Analyze the email \
content provided and identify potential phishing attempts, scams, and malicious links.\n\
\n\
Email Content:\n\
{email_content}\n\
{attachment_section}\
\n\
Consider the following aspects:\n\
- Sender's address and reputation\n\
- Subject line and its relevance to the content\n\
- Presence of suspicious links or attachments\n\
- Grammar and spelling errors\n\
- Tone and urgency of the message\n\
- Requests for sensitive information\n\
\n\
Respond with a single JSON object:\n\
{{\"isPhishing\": <true|false>, \"riskLevel\": \"low\"|\"medium\"|\"high\", \
\"reason\": \"<detailed explanation of detected scams, suspicious links, and other threats>\", \
\"suggestedAction\": \"<actions the user should take>\"}}"
    )
}

pub fn url_assessment(url: &str) -> String {
    format!(
        "You are a cybersecurity expert analyzing website links for malicious domains, \
suspicious redirects, and unsafe content. Assess the risk level of the following URL and \
provide a reason for your assessment.\n\
\n\
URL: {url}\n\
\n\
Respond with a single JSON object:\n\
{{\"riskLevel\": \"info\"|\"low\"|\"medium\"|\"high\"|\"critical\", \
\"reason\": \"<detailed reason, including malicious domains, redirects, or unsafe content>\"}}"
    )
}

pub fn fraud_analysis(transaction_data: &str) -> String {
    format!(
        "You are an expert in fraud detection. Analyze the provided transaction data to \
identify potential fraud or data manipulation.\n\
\n\
Transaction Data: {transaction_data}\n\
\n\
Determine if the transaction is fraudulent, explain your reasoning, and provide a \
confidence score. The confidenceScore MUST be between 0 and 1.\n\
\n\
Respond with a single JSON object:\n\
{{\"isFraudulent\": <true|false>, \"confidenceScore\": <0..1>, \
\"explanation\": \"<why the transaction is or is not considered fraudulent>\"}}"
    )
}

pub fn malware_scan(file_name: &str, content_base64: &str) -> String {
    format!(
        "You are a malware analyst. Review the file below for droppers, malicious macros, \
embedded executables, obfuscated scripts, and other indicators of compromise.\n\
\n\
File name: {file_name}\n\
File content (base64):\n\
{content_base64}\n\
\n\
Respond with a single JSON object:\n\
{{\"isMalicious\": <true|false>, \"riskLevel\": \"info\"|\"low\"|\"medium\"|\"high\"|\"critical\", \
\"reason\": \"<detailed explanation>\", \"indicators\": [\"<indicator>\", ...]}}"
    )
}

pub fn correlation(digest: &CorrelationDigest) -> String {
    format!(
        "You are an expert cybersecurity incident responder.\n\
\n\
You will receive findings from various security agents, including email analysis, URL risk \
assessment, malware detection, and fraud pattern analysis. Your task is to correlate these \
findings to determine if a coordinated security incident has occurred, assess its severity, \
summarize the incident, and provide recommendations for addressing it.\n\
\n\
Email Analysis Findings: {email}\n\
URL Risk Assessment Findings: {url}\n\
Malware Detection Findings: {malware}\n\
Fraud Pattern Analysis Findings: {fraud}\n\
\n\
Respond with a single JSON object:\n\
{{\"isIncident\": <true|false>, \"severity\": \"low\"|\"medium\"|\"high\"|\"critical\", \
\"summary\": \"<concise summary of the incident>\", \
\"recommendations\": \"<actions that should be taken>\"}}",
        email = digest.email_analysis,
        url = digest.url_risk_assessment,
        malware = digest.malware_detection,
        fraud = digest.fraud_pattern_analysis,
    )
}

pub fn incident_summary(incidents: &[IncidentDigest]) -> String {
    let lines: Vec<String> = incidents
        .iter()
        .map(|incident| {
            format!(
                "- Agent: {}\n  Confidence Level: {:.2}\n  Reasoning: {}",
                incident.agent, incident.confidence_level, incident.reasoning
            )
        })
        .collect();

    format!(
        "You are an expert security analyst tasked with summarizing correlated security \
incidents. Given the following incidents, provide a concise summary highlighting key \
findings and overall confidence level. Explain how the incidents are related to each other \
and include any recommendations you have to improve the security posture.\n\
\n\
Incidents:\n\
{}\n\
\n\
Respond with a single JSON object:\n\
{{\"summary\": \"<summary of the correlated incidents>\"}}",
        lines.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_prompt_carries_content_and_shape() {
        let prompt = email_analysis("From: a@b.c\nHello", &[]);
        assert!(prompt.contains("From: a@b.c"));
        assert!(prompt.contains("\"isPhishing\""));
        assert!(!prompt.contains("Attachments"));
    }

    #[test]
    fn test_email_prompt_lists_attachments() {
        let prompt = email_analysis("body", &["AAAA".to_string(), "BBBB".to_string()]);
        assert!(prompt.contains("Attachments (2 total"));
    }

    #[test]
    fn test_correlation_prompt_places_buckets() {
        let digest = CorrelationDigest {
            email_analysis: "phishing wave".to_string(),
            ..CorrelationDigest::default()
        };
        let prompt = correlation(&digest);
        assert!(prompt.contains("Email Analysis Findings: phishing wave"));
        assert!(prompt.contains("URL Risk Assessment Findings: \n"));
    }
}
