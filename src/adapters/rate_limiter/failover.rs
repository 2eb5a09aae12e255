//! Failover rate limiter - Redis primary with an in-memory fallback.
//!
//! When the shared store errors, admission control continues on the
//! local counters instead of failing the request. Counters are not
//! shared across the transition, so a failover briefly resets each
//! caller's window; the limiter is best-effort, not a security boundary.

use async_trait::async_trait;
use std::sync::Arc;

use crate::ports::{
    RateLimitDecision, RateLimitError, RateLimitKey, RateLimitStatus, RateLimiter,
};

/// Wrapper that degrades from a primary limiter to a local fallback.
pub struct FailoverRateLimiter {
    primary: Arc<dyn RateLimiter>,
    fallback: Arc<dyn RateLimiter>,
}

impl FailoverRateLimiter {
    pub fn new(primary: Arc<dyn RateLimiter>, fallback: Arc<dyn RateLimiter>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl RateLimiter for FailoverRateLimiter {
    async fn check(&self, key: &RateLimitKey) -> Result<RateLimitDecision, RateLimitError> {
        match self.primary.check(key).await {
            Ok(decision) => Ok(decision),
            Err(err) => {
                tracing::warn!(error = %err, "primary rate limiter unavailable, using local fallback");
                self.fallback.check(key).await
            }
        }
    }

    async fn status(&self, key: &RateLimitKey) -> Result<RateLimitStatus, RateLimitError> {
        match self.primary.status(key).await {
            Ok(status) => Ok(status),
            Err(_) => self.fallback.status(key).await,
        }
    }

    async fn reset(&self, key: &RateLimitKey) -> Result<(), RateLimitError> {
        let primary = self.primary.reset(key).await;
        let fallback = self.fallback.reset(key).await;
        primary.or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::rate_limiter::InMemoryRateLimiter;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Limiter that always errors, standing in for an unreachable Redis.
    struct BrokenLimiter {
        calls: AtomicU32,
    }

    impl BrokenLimiter {
        fn new() -> Self {
            Self {
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl RateLimiter for BrokenLimiter {
        async fn check(&self, _key: &RateLimitKey) -> Result<RateLimitDecision, RateLimitError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(RateLimitError::Unavailable("connection refused".into()))
        }

        async fn status(&self, _key: &RateLimitKey) -> Result<RateLimitStatus, RateLimitError> {
            Err(RateLimitError::Unavailable("connection refused".into()))
        }

        async fn reset(&self, _key: &RateLimitKey) -> Result<(), RateLimitError> {
            Err(RateLimitError::Unavailable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn falls_back_when_primary_errors() {
        let broken = Arc::new(BrokenLimiter::new());
        let limiter = FailoverRateLimiter::new(
            broken.clone(),
            Arc::new(InMemoryRateLimiter::with_defaults()),
        );
        let key = RateLimitKey::ip("192.168.1.1");

        let decision = limiter.check(&key).await.unwrap();
        assert!(decision.is_allowed());
        assert_eq!(broken.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fallback_still_enforces_the_limit() {
        let limiter = FailoverRateLimiter::new(
            Arc::new(BrokenLimiter::new()),
            Arc::new(InMemoryRateLimiter::with_defaults()),
        );
        let key = RateLimitKey::ip("192.168.1.2");

        for _ in 0..5 {
            assert!(limiter.check(&key).await.unwrap().is_allowed());
        }
        assert!(limiter.check(&key).await.unwrap().is_denied());
    }

    #[tokio::test]
    async fn healthy_primary_is_used_directly() {
        let primary = Arc::new(InMemoryRateLimiter::with_defaults());
        let fallback = Arc::new(InMemoryRateLimiter::with_defaults());
        let limiter = FailoverRateLimiter::new(primary, fallback.clone());
        let key = RateLimitKey::ip("192.168.1.3");

        limiter.check(&key).await.unwrap();

        // fallback never saw the request
        let status = fallback.status(&key).await.unwrap();
        assert_eq!(status.remaining, status.limit);
    }
}
