//! Analysis Agents
//!
//! One wrapper per analysis kind. All follow the same pipeline: local
//! syntactic validation, one classification round trip, mapping of the
//! native scale into the unified risk level, and a store append when the
//! result crosses the reportable threshold. Failures are terminal here and
//! are converted by the handlers into user-visible notices.

pub mod email;
pub mod fraud;
pub mod malware;
pub mod url;

use serde::Serialize;
use thiserror::Error;

use crate::logic::analyst::AnalystError;
use crate::logic::store::StoreError;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Analyst(#[from] AnalystError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<validator::ValidationErrors> for AgentError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AgentError::Validation(flatten_errors(&errors))
    }
}

/// Flatten field errors into one deterministic inline message.
fn flatten_errors(errors: &validator::ValidationErrors) -> String {
    let mut parts = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string());
            parts.push(format!("{}: {}", field, message));
        }
    }
    parts.sort();
    parts.join("; ")
}

/// Incident details are the entire raw judgment with the analyzed input
/// merged in, no field-level filtering.
pub(crate) fn details_with_input<T: Serialize>(
    judgment: &T,
    input_key: &str,
    input_value: serde_json::Value,
) -> serde_json::Value {
    let mut details = serde_json::to_value(judgment).unwrap_or(serde_json::Value::Null);
    if let serde_json::Value::Object(map) = &mut details {
        map.insert(input_key.to_string(), input_value);
    }
    details
}
