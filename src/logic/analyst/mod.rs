//! Hosted Analyst Module
//!
//! Every hard judgment in this system is delegated to a hosted
//! large-language-model classifier through a thin prompt layer. This module
//! owns the external contract: prompt templates, the typed judgment objects
//! the remote returns, and the HTTP client that bridges the two.
//!
//! ## Structure
//! - `types`: judgment objects (the declared response shapes)
//! - `prompts`: instruction templates, one per analysis kind
//! - `gemini`: the concrete HTTP client
//!
//! Consumers depend on the [`Analyst`] trait, never on the concrete client,
//! so tests can inject a stub.

pub mod gemini;
pub mod prompts;
pub mod types;

pub use gemini::GeminiAnalyst;
pub use types::{
    CorrelationDigest, CorrelationJudgment, EmailJudgment, EmailRiskLevel, FraudJudgment,
    IncidentDigest, MalwareJudgment, SummaryJudgment, UrlJudgment,
};

use async_trait::async_trait;
use thiserror::Error;

/// Analyst client errors. Every variant is terminal at the wrapper
/// boundary: no retry, no backoff.
#[derive(Debug, Error)]
pub enum AnalystError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Analyst returned HTTP {0}")]
    Http(u16),

    #[error("Malformed analyst response: {0}")]
    Parse(String),

    #[error("Analyst API key not configured")]
    NotConfigured,
}

/// One method per analysis kind plus the two second-pass calls.
#[async_trait]
pub trait Analyst: Send + Sync {
    async fn analyze_email(
        &self,
        email_content: &str,
        attachments: &[String],
    ) -> Result<EmailJudgment, AnalystError>;

    async fn assess_url(&self, url: &str) -> Result<UrlJudgment, AnalystError>;

    async fn analyze_transaction(
        &self,
        transaction_data: &str,
    ) -> Result<FraudJudgment, AnalystError>;

    async fn scan_file(
        &self,
        file_name: &str,
        content_base64: &str,
    ) -> Result<MalwareJudgment, AnalystError>;

    async fn correlate(
        &self,
        digest: &CorrelationDigest,
    ) -> Result<CorrelationJudgment, AnalystError>;

    async fn summarize(
        &self,
        incidents: &[IncidentDigest],
    ) -> Result<SummaryJudgment, AnalystError>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! Configurable stub analyst for wrapper tests.

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::models::incident::RiskLevel;

    pub struct StubAnalyst {
        pub email: Option<EmailJudgment>,
        pub url: Option<UrlJudgment>,
        pub fraud: Option<FraudJudgment>,
        pub malware: Option<MalwareJudgment>,
        pub correlation: Option<CorrelationJudgment>,
        pub delay: Option<Duration>,
        pub calls: AtomicUsize,
    }

    impl StubAnalyst {
        /// A stub whose every call fails with a network error.
        pub fn failing() -> Self {
            Self {
                email: None,
                url: None,
                fraud: None,
                malware: None,
                correlation: None,
                delay: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn with_email(judgment: EmailJudgment) -> Self {
            Self { email: Some(judgment), ..Self::failing() }
        }

        pub fn with_url(judgment: UrlJudgment) -> Self {
            Self { url: Some(judgment), ..Self::failing() }
        }

        pub fn with_fraud(judgment: FraudJudgment) -> Self {
            Self { fraud: Some(judgment), ..Self::failing() }
        }

        pub fn with_malware(judgment: MalwareJudgment) -> Self {
            Self { malware: Some(judgment), ..Self::failing() }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        async fn tick(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
        }

        fn take<T: Clone>(slot: &Option<T>) -> Result<T, AnalystError> {
            slot.clone()
                .ok_or_else(|| AnalystError::Network("stub: connection refused".to_string()))
        }
    }

    #[async_trait]
    impl Analyst for StubAnalyst {
        async fn analyze_email(
            &self,
            _email_content: &str,
            _attachments: &[String],
        ) -> Result<EmailJudgment, AnalystError> {
            self.tick().await;
            Self::take(&self.email)
        }

        async fn assess_url(&self, _url: &str) -> Result<UrlJudgment, AnalystError> {
            self.tick().await;
            Self::take(&self.url)
        }

        async fn analyze_transaction(
            &self,
            _transaction_data: &str,
        ) -> Result<FraudJudgment, AnalystError> {
            self.tick().await;
            Self::take(&self.fraud)
        }

        async fn scan_file(
            &self,
            _file_name: &str,
            _content_base64: &str,
        ) -> Result<MalwareJudgment, AnalystError> {
            self.tick().await;
            Self::take(&self.malware)
        }

        async fn correlate(
            &self,
            _digest: &CorrelationDigest,
        ) -> Result<CorrelationJudgment, AnalystError> {
            self.tick().await;
            Self::take(&self.correlation)
        }

        async fn summarize(
            &self,
            _incidents: &[IncidentDigest],
        ) -> Result<SummaryJudgment, AnalystError> {
            self.tick().await;
            Err(AnalystError::Network("stub: connection refused".to_string()))
        }
    }

    pub fn benign_url_judgment() -> UrlJudgment {
        UrlJudgment {
            risk_level: RiskLevel::Low,
            reason: "Well-known domain with no redirect chain".to_string(),
        }
    }

    pub fn risky_url_judgment(risk_level: RiskLevel) -> UrlJudgment {
        UrlJudgment {
            risk_level,
            reason: "Domain impersonates a payment provider".to_string(),
        }
    }

    pub fn phishing_email_judgment(risk_level: EmailRiskLevel) -> EmailJudgment {
        EmailJudgment {
            is_phishing: true,
            risk_level,
            reason: "Credential harvesting link and spoofed sender".to_string(),
            suggested_action: "Delete the email and report it".to_string(),
        }
    }
}
