//! Rate limiter adapters.
//!
//! - `RedisRateLimiter` - shared sorted-set counters for multi-instance
//!   deployments
//! - `InMemoryRateLimiter` - per-process fallback and test implementation
//! - `FailoverRateLimiter` - degrades from Redis to local counters when
//!   the shared store is unavailable

mod config;
mod failover;
mod in_memory;
mod redis;

pub use self::redis::RedisRateLimiter;
pub use config::{RateLimitConfig, WindowRule};
pub use failover::FailoverRateLimiter;
pub use in_memory::InMemoryRateLimiter;
