//! Rate limiting port - sliding-window admission control.
//!
//! Every entry point passes through this gate before any work is done.
//! The window slides: each request's timestamp is recorded, timestamps
//! older than the window are trimmed, and the count inside the window
//! decides admission.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Timestamp;

/// Port for rate limiting operations.
///
/// Implementations must be thread-safe and keep the trim/append/count
/// sequence atomic per key.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Records the request and decides admission.
    async fn check(&self, key: &RateLimitKey) -> Result<RateLimitDecision, RateLimitError>;

    /// Current status without recording a request.
    async fn status(&self, key: &RateLimitKey) -> Result<RateLimitStatus, RateLimitError>;

    /// Clears the window for a key (admin operation).
    async fn reset(&self, key: &RateLimitKey) -> Result<(), RateLimitError>;
}

/// The scope at which rate limiting is applied.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitScope {
    /// Global limit across all callers (infrastructure protection).
    Global,
    /// Per-caller limit keyed by network origin address.
    Ip,
}

impl RateLimitScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateLimitScope::Global => "global",
            RateLimitScope::Ip => "ip",
        }
    }
}

impl fmt::Display for RateLimitScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Key identifying what to rate limit.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct RateLimitKey {
    pub scope: RateLimitScope,
    pub identifier: String,
}

impl RateLimitKey {
    /// Creates the global key.
    pub fn global() -> Self {
        Self {
            scope: RateLimitScope::Global,
            identifier: "global".to_string(),
        }
    }

    /// Creates a per-caller key from a network origin address.
    pub fn ip(ip: &str) -> Self {
        Self {
            scope: RateLimitScope::Ip,
            identifier: ip.to_string(),
        }
    }

    /// Storage key shared by the Redis and in-memory backends.
    pub fn storage_key(&self) -> String {
        format!("ratelimit:{}:{}", self.scope, self.identifier)
    }
}

/// Result of a rate limit check.
#[derive(Debug, Clone)]
pub enum RateLimitDecision {
    /// Request admitted; includes current status.
    Allowed(RateLimitStatus),
    /// Request rejected; includes denial details.
    Denied(RateLimitDenied),
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed(_))
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, RateLimitDecision::Denied(_))
    }
}

/// Current window status.
#[derive(Debug, Clone)]
pub struct RateLimitStatus {
    /// Maximum requests allowed in the window.
    pub limit: u32,
    /// Requests remaining in the current window.
    pub remaining: u32,
    /// When the oldest recorded request leaves the window.
    pub reset_at: Timestamp,
    /// Window length in seconds.
    pub window_secs: u32,
}

/// Details of a denial.
#[derive(Debug, Clone)]
pub struct RateLimitDenied {
    pub limit: u32,
    /// Seconds until the caller should retry.
    pub retry_after_secs: u32,
    /// When the window frees a slot.
    pub reset_at: Timestamp,
    pub scope: RateLimitScope,
    pub message: String,
}

/// Errors that can occur during rate limiting operations.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    /// Rate limiter backend is unavailable.
    #[error("rate limiter unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ip_key_has_correct_scope() {
        let key = RateLimitKey::ip("192.168.1.1");
        assert_eq!(key.scope, RateLimitScope::Ip);
        assert_eq!(key.identifier, "192.168.1.1");
    }

    #[test]
    fn storage_key_format() {
        assert_eq!(
            RateLimitKey::ip("10.0.0.1").storage_key(),
            "ratelimit:ip:10.0.0.1"
        );
        assert_eq!(RateLimitKey::global().storage_key(), "ratelimit:global:global");
    }

    #[test]
    fn decision_predicates_work() {
        let status = RateLimitStatus {
            limit: 5,
            remaining: 4,
            reset_at: Timestamp::now(),
            window_secs: 60,
        };
        assert!(RateLimitDecision::Allowed(status).is_allowed());

        let denied = RateLimitDenied {
            limit: 5,
            retry_after_secs: 30,
            reset_at: Timestamp::now(),
            scope: RateLimitScope::Ip,
            message: "Rate limit exceeded".to_string(),
        };
        assert!(RateLimitDecision::Denied(denied).is_denied());
    }
}
