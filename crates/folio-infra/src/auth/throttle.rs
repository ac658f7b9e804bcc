//! In-memory login throttle - failed-attempt counting with a timed lockout.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use folio_core::ports::{LoginThrottle, ThrottleStatus};

/// Login throttle configuration.
#[derive(Debug, Clone)]
pub struct ThrottleConfig {
    /// Failures allowed before the client is locked out.
    pub max_attempts: u32,
    /// How long a lockout lasts, measured from the last failure.
    pub lockout: Duration,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            lockout: Duration::from_secs(15 * 60),
        }
    }
}

impl ThrottleConfig {
    /// Load configuration from `LOGIN_MAX_ATTEMPTS` and `LOGIN_LOCKOUT_MINUTES`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_attempts: std::env::var("LOGIN_MAX_ATTEMPTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_attempts),
            lockout: std::env::var("LOGIN_LOCKOUT_MINUTES")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .map(|m| Duration::from_secs(m * 60))
                .unwrap_or(defaults.lockout),
        }
    }
}

struct Attempts {
    failures: u32,
    last_failure: Instant,
}

/// Per-client failure counter.
///
/// Note: Counts are per-process and lost on restart.
pub struct InMemoryLoginThrottle {
    attempts: RwLock<HashMap<String, Attempts>>,
    config: ThrottleConfig,
}

impl InMemoryLoginThrottle {
    pub fn new(config: ThrottleConfig) -> Self {
        Self {
            attempts: RwLock::new(HashMap::new()),
            config,
        }
    }

    fn status(&self, entry: Option<&Attempts>, now: Instant) -> ThrottleStatus {
        let Some(entry) = entry else {
            return ThrottleStatus::Allowed {
                remaining: self.config.max_attempts,
            };
        };

        let elapsed = now.saturating_duration_since(entry.last_failure);
        if entry.failures >= self.config.max_attempts && elapsed < self.config.lockout {
            ThrottleStatus::LockedOut {
                retry_after: self.config.lockout - elapsed,
            }
        } else {
            ThrottleStatus::Allowed {
                remaining: self.config.max_attempts.saturating_sub(entry.failures),
            }
        }
    }

    async fn check_at(&self, key: &str, now: Instant) -> ThrottleStatus {
        let mut attempts = self.attempts.write().await;

        // An expired record starts over.
        if attempts
            .get(key)
            .is_some_and(|a| now.saturating_duration_since(a.last_failure) >= self.config.lockout)
        {
            attempts.remove(key);
        }

        self.status(attempts.get(key), now)
    }

    async fn record_failure_at(&self, key: &str, now: Instant) -> ThrottleStatus {
        let mut attempts = self.attempts.write().await;

        // Drop every expired record, not only this key.
        let lockout = self.config.lockout;
        attempts.retain(|_, a| now.saturating_duration_since(a.last_failure) < lockout);

        let entry = attempts.entry(key.to_string()).or_insert(Attempts {
            failures: 0,
            last_failure: now,
        });
        entry.failures += 1;
        entry.last_failure = now;

        let status = self.status(Some(&*entry), now);
        if matches!(status, ThrottleStatus::LockedOut { .. }) {
            tracing::warn!(client = %key, failures = entry.failures, "Admin login locked out");
        }
        status
    }
}

impl Default for InMemoryLoginThrottle {
    fn default() -> Self {
        Self::new(ThrottleConfig::default())
    }
}

#[async_trait]
impl LoginThrottle for InMemoryLoginThrottle {
    async fn check(&self, key: &str) -> ThrottleStatus {
        self.check_at(key, Instant::now()).await
    }

    async fn record_failure(&self, key: &str) -> ThrottleStatus {
        self.record_failure_at(key, Instant::now()).await
    }

    async fn record_success(&self, key: &str) {
        self.attempts.write().await.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn throttle() -> InMemoryLoginThrottle {
        InMemoryLoginThrottle::new(ThrottleConfig {
            max_attempts: 3,
            lockout: Duration::from_secs(60),
        })
    }

    #[tokio::test]
    async fn test_counts_down_then_locks() {
        let throttle = throttle();
        let start = Instant::now();

        assert_eq!(
            throttle.record_failure_at("client", start).await,
            ThrottleStatus::Allowed { remaining: 2 }
        );
        assert_eq!(
            throttle.record_failure_at("client", start).await,
            ThrottleStatus::Allowed { remaining: 1 }
        );
        assert_eq!(
            throttle.record_failure_at("client", start).await,
            ThrottleStatus::LockedOut {
                retry_after: Duration::from_secs(60)
            }
        );

        let later = start + Duration::from_secs(45);
        assert_eq!(
            throttle.check_at("client", later).await,
            ThrottleStatus::LockedOut {
                retry_after: Duration::from_secs(15)
            }
        );
    }

    #[tokio::test]
    async fn test_lockout_expires() {
        let throttle = throttle();
        let start = Instant::now();
        for _ in 0..3 {
            throttle.record_failure_at("client", start).await;
        }

        let after = start + Duration::from_secs(60);

        assert_eq!(
            throttle.check_at("client", after).await,
            ThrottleStatus::Allowed { remaining: 3 }
        );
    }

    #[tokio::test]
    async fn test_expired_records_are_pruned() {
        let throttle = throttle();
        let start = Instant::now();
        for i in 0..10 {
            throttle.record_failure_at(&format!("10.0.0.{i}"), start).await;
        }

        let later = start + Duration::from_secs(60);
        throttle.record_failure_at("10.0.0.99", later).await;

        let attempts = throttle.attempts.read().await;
        assert_eq!(attempts.len(), 1);
        assert!(attempts.contains_key("10.0.0.99"));
    }

    #[tokio::test]
    async fn test_success_clears_and_keys_are_independent() {
        let throttle = throttle();
        let now = Instant::now();
        throttle.record_failure_at("a", now).await;
        throttle.record_failure_at("b", now).await;

        throttle.record_success("a").await;

        assert_eq!(
            throttle.check_at("a", now).await,
            ThrottleStatus::Allowed { remaining: 3 }
        );
        assert_eq!(
            throttle.check_at("b", now).await,
            ThrottleStatus::Allowed { remaining: 2 }
        );
    }
}
