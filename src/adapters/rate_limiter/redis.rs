//! Redis-backed sliding-window rate limiter.
//!
//! Each caller key maps to a sorted set of request timestamps. One check
//! trims entries older than the window, adds the current timestamp,
//! counts the set, and refreshes the key's expiry - all inside a single
//! MULTI/EXEC pipeline, so concurrent requests from the same caller
//! cannot interleave between the steps.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::domain::foundation::Timestamp;
use crate::ports::{
    RateLimitDecision, RateLimitDenied, RateLimitError, RateLimitKey, RateLimitStatus,
    RateLimiter,
};

use super::config::RateLimitConfig;

/// Sliding-window limiter over Redis sorted sets, for multi-instance
/// deployments.
#[derive(Clone)]
pub struct RedisRateLimiter {
    conn: MultiplexedConnection,
    config: RateLimitConfig,
}

impl RedisRateLimiter {
    pub fn new(conn: MultiplexedConnection, config: RateLimitConfig) -> Self {
        Self { conn, config }
    }

    fn unavailable(e: redis::RedisError) -> RateLimitError {
        RateLimitError::Unavailable(e.to_string())
    }

    /// Oldest live timestamp in the set, for reset metadata.
    async fn oldest_entry(
        conn: &mut MultiplexedConnection,
        storage_key: &str,
    ) -> Result<Option<u64>, RateLimitError> {
        let oldest: Vec<(String, f64)> = conn
            .zrange_withscores(storage_key, 0, 0)
            .await
            .map_err(Self::unavailable)?;
        Ok(oldest.first().map(|(_, score)| *score as u64))
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn check(&self, key: &RateLimitKey) -> Result<RateLimitDecision, RateLimitError> {
        let rule = self.config.rule_for(key);
        let storage_key = key.storage_key();
        let now = Timestamp::now().as_unix_millis();
        let window_start = now.saturating_sub(rule.window_millis());
        // unique member so simultaneous requests never collapse into one
        let member = format!("{}:{}", now, Uuid::new_v4());

        let mut conn = self.conn.clone();

        // trim + add + count + expire, atomically
        let (_, _, count, _): (i64, i64, i64, i64) = redis::pipe()
            .atomic()
            .zrembyscore(&storage_key, 0i64, window_start as i64)
            .zadd(&storage_key, &member, now as i64)
            .zcard(&storage_key)
            .expire(&storage_key, rule.window_secs as i64 + 1)
            .query_async(&mut conn)
            .await
            .map_err(Self::unavailable)?;

        let oldest = Self::oldest_entry(&mut conn, &storage_key)
            .await?
            .unwrap_or(now);
        let reset_at = Timestamp::from_unix_secs((oldest + rule.window_millis()) / 1000);

        if count as u32 > rule.max_requests {
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
            remaining: rule.max_requests.saturating_sub(count as u32),
            reset_at,
            window_secs: rule.window_secs,
        }))
    }

    async fn status(&self, key: &RateLimitKey) -> Result<RateLimitStatus, RateLimitError> {
        let rule = self.config.rule_for(key);
        let storage_key = key.storage_key();
        let now = Timestamp::now().as_unix_millis();
        let window_start = now.saturating_sub(rule.window_millis());

        let mut conn = self.conn.clone();

        let count: i64 = conn
            .zcount(&storage_key, (window_start + 1) as i64, "+inf")
            .await
            .map_err(Self::unavailable)?;

        let oldest = Self::oldest_entry(&mut conn, &storage_key)
            .await?
            .unwrap_or(now);

        Ok(RateLimitStatus {
            limit: rule.max_requests,
            remaining: rule.max_requests.saturating_sub(count as u32),
            reset_at: Timestamp::from_unix_secs((oldest + rule.window_millis()) / 1000),
            window_secs: rule.window_secs,
        })
    }

    async fn reset(&self, key: &RateLimitKey) -> Result<(), RateLimitError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key.storage_key())
            .await
            .map_err(Self::unavailable)?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisRateLimiter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
