//! AI provider configuration (audit and extraction models).

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Configuration for the chat-completions provider used by the audit and
/// extraction calls.
///
/// A missing API key is not a validation error: the provider adapter
/// reports `not_configured` per call and the pipeline degrades to
/// defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// API key; absent means the provider is disabled.
    pub api_key: Option<Secret<String>>,
    /// Model identifier sent with each request.
    pub model: String,
    /// Base URL of the chat-completions endpoint.
    pub base_url: String,
    /// Default per-call timeout in milliseconds, capped by the budget.
    pub timeout_ms: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com".to_string(),
            timeout_ms: 5000,
        }
    }
}

impl AiConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http") {
            return Err(ValidationError::new("ai.base_url", "must be an http(s) URL"));
        }
        if self.timeout_ms == 0 {
            return Err(ValidationError::new("ai.timeout_ms", "must be positive"));
        }
        if let Some(key) = &self.api_key {
            if key.expose_secret().trim().is_empty() {
                return Err(ValidationError::new("ai.api_key", "must not be blank when set"));
            }
        }
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
