//! Directory provider configuration (lawyer lookup).

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Configuration for the lawyer-directory search endpoint.
///
/// Like the AI provider, a missing key just disables the lookup; the
/// analysis degrades to an empty directory list.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// API key; absent means the lookup is disabled.
    pub api_key: Option<Secret<String>>,
    /// Base URL of the search endpoint.
    pub base_url: String,
    /// Default per-call timeout in milliseconds, capped by the budget.
    pub timeout_ms: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://places.googleapis.com".to_string(),
            timeout_ms: 2000,
        }
    }
}

impl DirectoryConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http") {
            return Err(ValidationError::new(
                "directory.base_url",
                "must be an http(s) URL",
            ));
        }
        if self.timeout_ms == 0 {
            return Err(ValidationError::new("directory.timeout_ms", "must be positive"));
        }
        if let Some(key) = &self.api_key {
            if key.expose_secret().trim().is_empty() {
                return Err(ValidationError::new(
                    "directory.api_key",
                    "must not be blank when set",
                ));
            }
        }
        Ok(())
    }
}
