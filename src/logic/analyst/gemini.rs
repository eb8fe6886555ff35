//! Gemini Analyst Client
//!
//! HTTP client for the hosted Gemini API. One `generateContent` round trip
//! per analysis; auth is the `?key=` query parameter. The response text is
//! expected to be the judgment JSON (a `responseMimeType` of
//! `application/json` is requested), but markdown fences are stripped
//! defensively before parsing because some model versions emit them anyway.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::prompts;
use super::types::{
    CorrelationDigest, CorrelationJudgment, EmailJudgment, FraudJudgment, IncidentDigest,
    MalwareJudgment, SummaryJudgment, UrlJudgment,
};
use super::{Analyst, AnalystError};
use crate::config::Config;

pub struct GeminiAnalyst {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl GeminiAnalyst {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.analyst_timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.analyst_base_url.clone(),
            api_key: config.analyst_api_key.clone(),
            model: config.analyst_model.clone(),
        }
    }

    /// One classification round trip. Returns the raw response text.
    async fn generate(&self, prompt: String) -> Result<String, AnalystError> {
        let api_key = self.api_key.as_ref().ok_or(AnalystError::NotConfigured)?;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );

        let body = serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": 0.2,
                "maxOutputTokens": 2048,
                "responseMimeType": "application/json"
            }
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AnalystError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AnalystError::Http(response.status().as_u16()));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| AnalystError::Parse(e.to_string()))?;

        value["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|text| text.to_string())
            .ok_or_else(|| AnalystError::Parse("no candidate text in response".to_string()))
    }

    fn parse_judgment<T: DeserializeOwned>(text: &str) -> Result<T, AnalystError> {
        serde_json::from_str(strip_fences(text)).map_err(|e| AnalystError::Parse(e.to_string()))
    }

    async fn judge<T: DeserializeOwned>(&self, prompt: String) -> Result<T, AnalystError> {
        let text = self.generate(prompt).await?;
        Self::parse_judgment(&text)
    }
}

/// Strip a surrounding markdown code fence, if any.
fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("```").unwrap_or(trimmed);
    trimmed.trim()
}

#[async_trait]
impl Analyst for GeminiAnalyst {
    async fn analyze_email(
        &self,
        email_content: &str,
        attachments: &[String],
    ) -> Result<EmailJudgment, AnalystError> {
        self.judge(prompts::email_analysis(email_content, attachments)).await
    }

    async fn assess_url(&self, url: &str) -> Result<UrlJudgment, AnalystError> {
        self.judge(prompts::url_assessment(url)).await
    }

    async fn analyze_transaction(
        &self,
        transaction_data: &str,
    ) -> Result<FraudJudgment, AnalystError> {
        self.judge(prompts::fraud_analysis(transaction_data)).await
    }

    async fn scan_file(
        &self,
        file_name: &str,
        content_base64: &str,
    ) -> Result<MalwareJudgment, AnalystError> {
        self.judge(prompts::malware_scan(file_name, content_base64)).await
    }

    async fn correlate(
        &self,
        digest: &CorrelationDigest,
    ) -> Result<CorrelationJudgment, AnalystError> {
        self.judge(prompts::correlation(digest)).await
    }

    async fn summarize(
        &self,
        incidents: &[IncidentDigest],
    ) -> Result<SummaryJudgment, AnalystError> {
        self.judge(prompts::incident_summary(incidents)).await
    }
}
