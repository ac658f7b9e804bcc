//! JWT session token implementation.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use folio_core::ports::{AuthError, Session, SessionClaims, TokenService};

// Placeholder shipped in sample env files; never accepted as a signing key.
const PLACEHOLDER_SECRET: &str = "change-me-in-production";

/// JWT session configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub session_hours: i64,
    pub issuer: String,
}

/// The default secret is random and lives only as long as the process.
impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: random_secret(),
            session_hours: 2,
            issuer: "folio-blog".to_string(),
        }
    }
}

impl JwtConfig {
    /// Load configuration from `JWT_SECRET`, `SESSION_HOURS` and `JWT_ISSUER`.
    ///
    /// Without a usable `JWT_SECRET` sessions are signed with a random key, so
    /// they stop validating when the server restarts.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if secret.trim() == PLACEHOLDER_SECRET => {
                tracing::error!(
                    "JWT_SECRET is the sample placeholder. Ignoring it and signing sessions with a random key."
                );
                defaults.secret
            }
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ => {
                tracing::warn!(
                    "JWT_SECRET not set. Signing sessions with a random key; sessions end on restart."
                );
                defaults.secret
            }
        };

        Self {
            secret,
            session_hours: std::env::var("SESSION_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.session_hours),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }
}

fn random_secret() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // session id
    exp: i64,
    iat: i64,
    iss: String,
}

/// JWT-based admin session service.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue_session(&self) -> Result<Session, AuthError> {
        let now = Utc::now();
        let expires_at = now + TimeDelta::hours(self.config.session_hours);

        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(Session { token, expires_at })
    }

    fn validate_session(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(SessionClaims {
            session_id: token_data.claims.sub,
            exp: token_data.claims.exp,
        })
    }

    fn expiration_seconds(&self) -> i64 {
        self.config.session_hours * 3600
    }
}
