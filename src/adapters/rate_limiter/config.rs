//! Rate limit configuration.

use serde::Deserialize;

use crate::ports::{RateLimitKey, RateLimitScope};

/// One sliding-window rule.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WindowRule {
    /// Maximum requests inside the window.
    pub max_requests: u32,
    /// Window length in seconds.
    pub window_secs: u32,
}

impl WindowRule {
    pub fn window_millis(&self) -> u64 {
        self.window_secs as u64 * 1000
    }
}

/// Per-scope sliding-window rules.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Per-caller rule (keyed by network origin address).
    pub per_ip: WindowRule,
    /// Global rule across all callers.
    pub global: WindowRule,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_ip: WindowRule {
                max_requests: 5,
                window_secs: 60,
            },
            global: WindowRule {
                max_requests: 1000,
                window_secs: 60,
            },
        }
    }
}

impl RateLimitConfig {
    /// The rule applying to a key.
    pub fn rule_for(&self, key: &RateLimitKey) -> WindowRule {
        match key.scope {
            RateLimitScope::Ip => self.per_ip,
            RateLimitScope::Global => self.global,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_per_ip_rule_is_five_per_minute() {
        let config = RateLimitConfig::default();
        assert_eq!(config.per_ip.max_requests, 5);
        assert_eq!(config.per_ip.window_secs, 60);
    }

    #[test]
    fn rule_follows_key_scope() {
        let config = RateLimitConfig::default();
        assert_eq!(
            config.rule_for(&RateLimitKey::ip("1.2.3.4")).max_requests,
            5
        );
        assert_eq!(config.rule_for(&RateLimitKey::global()).max_requests, 1000);
    }

    #[test]
    fn window_millis_converts() {
        let rule = WindowRule {
            max_requests: 5,
            window_secs: 60,
        };
        assert_eq!(rule.window_millis(), 60_000);
    }
}
