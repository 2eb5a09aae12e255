//! In-memory sliding-window rate limiter.
//!
//! Per-process fallback for when Redis is unavailable, and the default
//! for tests and single-instance deployments. The trim/append/count
//! sequence runs under one lock, so it is atomic within the process.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::Timestamp;
use crate::ports::{
    RateLimitDecision, RateLimitDenied, RateLimitError, RateLimitKey, RateLimitStatus,
    RateLimiter,
};

use super::config::RateLimitConfig;

/// Sliding-window limiter over per-key timestamp lists.
#[derive(Debug)]
pub struct InMemoryRateLimiter {
    config: RateLimitConfig,
    /// Request timestamps (unix millis) per storage key.
    windows: Arc<Mutex<HashMap<String, Vec<u64>>>>,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(RateLimitConfig::default())
    }

    fn now_millis() -> u64 {
        Timestamp::now().as_unix_millis()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: &RateLimitKey) -> Result<RateLimitDecision, RateLimitError> {
        let rule = self.config.rule_for(key);
        let now = Self::now_millis();
        let window_start = now.saturating_sub(rule.window_millis());

        let mut windows = self.windows.lock().await;
        let entries = windows.entry(key.storage_key()).or_default();

        // trim, append, count: one atomic sequence under the lock
        entries.retain(|&ts| ts > window_start);
        entries.push(now);
        let count = entries.len() as u32;

        let oldest = entries.first().copied().unwrap_or(now);
        let reset_at = Timestamp::from_unix_secs((oldest + rule.window_millis()) / 1000);

        if count > rule.max_requests {
            let retry_after_ms = (oldest + rule.window_millis()).saturating_sub(now);
            let retry_after_secs = (((retry_after_ms + 999) / 1000) as u32).max(1);
            return Ok(RateLimitDecision::Denied(RateLimitDenied {
                limit: rule.max_requests,
                retry_after_secs,
                reset_at,
                scope: key.scope,
                message: format!(
                    "Rate limit exceeded for {}. Retry after {} seconds.",
                    key.scope, retry_after_secs
                ),
            }));
        }

        Ok(RateLimitDecision::Allowed(RateLimitStatus {
            limit: rule.max_requests,
            remaining: rule.max_requests - count,
            reset_at,
            window_secs: rule.window_secs,
        }))
    }

    async fn status(&self, key: &RateLimitKey) -> Result<RateLimitStatus, RateLimitError> {
        let rule = self.config.rule_for(key);
        let now = Self::now_millis();
        let window_start = now.saturating_sub(rule.window_millis());

        let windows = self.windows.lock().await;
        let (count, oldest) = windows
            .get(&key.storage_key())
            .map(|entries| {
                let live: Vec<u64> = entries.iter().copied().filter(|&ts| ts > window_start).collect();
                (live.len() as u32, live.first().copied().unwrap_or(now))
            })
            .unwrap_or((0, now));

        Ok(RateLimitStatus {
            limit: rule.max_requests,
            remaining: rule.max_requests.saturating_sub(count),
            reset_at: Timestamp::from_unix_secs((oldest + rule.window_millis()) / 1000),
            window_secs: rule.window_secs,
        })
    }

    async fn reset(&self, key: &RateLimitKey) -> Result<(), RateLimitError> {
        let mut windows = self.windows.lock().await;
        windows.remove(&key.storage_key());
        Ok(())
    }
}
