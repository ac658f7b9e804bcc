//! Admin authentication ports.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// An issued admin session.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Claims carried by a valid session token.
#[derive(Debug, Clone)]
pub struct SessionClaims {
    pub session_id: String,
    pub exp: i64,
}

/// Session token service.
pub trait TokenService: Send + Sync {
    /// Issue a new admin session token.
    fn issue_session(&self) -> Result<Session, AuthError>;

    /// Validate and decode a session token.
    fn validate_session(&self, token: &str) -> Result<SessionClaims, AuthError>;

    /// Get the token lifetime in seconds.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Outcome of a login throttle check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleStatus {
    /// The client may attempt a login; `remaining` failures are left before lockout.
    Allowed { remaining: u32 },
    /// The client is locked out for `retry_after`.
    LockedOut { retry_after: Duration },
}

/// Tracks failed logins per client and enforces a lockout.
#[async_trait]
pub trait LoginThrottle: Send + Sync {
    /// Check whether `key` may attempt a login.
    async fn check(&self, key: &str) -> ThrottleStatus;

    /// Record a failed attempt and return the resulting status.
    async fn record_failure(&self, key: &str) -> ThrottleStatus;

    /// Forget all failures for `key`.
    async fn record_success(&self, key: &str);
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
