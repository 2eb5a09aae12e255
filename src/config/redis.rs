//! Redis configuration (rate-limit counters).

use serde::Deserialize;

use super::error::ValidationError;

/// Redis connection configuration.
///
/// Optional: without a URL the rate limiter runs on its in-memory
/// fallback only, which is acceptable for single-instance deployments.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    /// Connection URL, e.g. `redis://localhost:6379`.
    pub url: Option<String>,
}

impl RedisConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = &self.url {
            if !url.starts_with("redis://") && !url.starts_with("rediss://") {
                return Err(ValidationError::new(
                    "redis.url",
                    "must start with redis:// or rediss://",
                ));
            }
        }
        Ok(())
    }
}
