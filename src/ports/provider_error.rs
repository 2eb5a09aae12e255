//! Shared failure taxonomy for provider ports.

use thiserror::Error;

/// Why a provider call produced no usable result.
///
/// These never reach the caller as errors; the analysis layer absorbs
/// them into a default-filled result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The client-side timeout fired before a response arrived.
    #[error("provider call timed out")]
    Timeout,

    /// The provider answered with a non-success status.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The response body could not be parsed, even after repair.
    #[error("malformed provider output: {0}")]
    Malformed(String),

    /// Credentials or endpoint are not configured; no I/O was attempted.
    #[error("provider not configured")]
    NotConfigured,
}

impl ProviderError {
    /// Short tag for logs and degradation markers.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Timeout => "timeout",
            ProviderError::Upstream(_) => "upstream_error",
            ProviderError::Malformed(_) => "malformed_output",
            ProviderError::NotConfigured => "not_configured",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(ProviderError::Timeout.kind(), "timeout");
        assert_eq!(ProviderError::Upstream("500".into()).kind(), "upstream_error");
        assert_eq!(
            ProviderError::Malformed("not json".into()).kind(),
            "malformed_output"
        );
        assert_eq!(ProviderError::NotConfigured.kind(), "not_configured");
    }
}
