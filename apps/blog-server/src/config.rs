//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use folio_core::CorruptionPolicy;

#[cfg(feature = "auth")]
use folio_infra::{JwtConfig, ThrottleConfig};

const DEFAULT_DATA_PATH: &str = "data/blog-posts.json";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreConfig,
    #[cfg(feature = "auth")]
    pub admin: Option<AdminConfig>,
}

/// Where and how the blog document is stored.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Backing file; `None` keeps the document in memory.
    pub data_path: Option<PathBuf>,
    pub corruption_policy: CorruptionPolicy,
}

/// Server-side admin login. Absent means the blog API is open.
#[cfg(feature = "auth")]
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub password_hash: String,
    pub jwt: JwtConfig,
    pub throttle: ThrottleConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            store: StoreConfig::from_env(),
            #[cfg(feature = "auth")]
            admin: AdminConfig::from_env(),
        }
    }
}

impl StoreConfig {
    /// `BLOG_STORE=memory` disables the file; otherwise `BLOG_DATA_PATH` is used.
    pub fn from_env() -> Self {
        let in_memory = env::var("BLOG_STORE")
            .map(|v| v.eq_ignore_ascii_case("memory"))
            .unwrap_or(false);

        let data_path = (!in_memory).then(|| {
            env::var("BLOG_DATA_PATH")
                .ok()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string())
                .into()
        });

        let corruption_policy = match env::var("STORE_CORRUPTION_POLICY") {
            Ok(raw) => CorruptionPolicy::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "Unknown STORE_CORRUPTION_POLICY, using default");
                CorruptionPolicy::default()
            }),
            Err(_) => CorruptionPolicy::default(),
        };

        Self {
            data_path,
            corruption_policy,
        }
    }
}

#[cfg(feature = "auth")]
impl AdminConfig {
    /// Enabled only when `ADMIN_PASSWORD_HASH` holds an Argon2 PHC string.
    pub fn from_env() -> Option<Self> {
        let password_hash = env::var("ADMIN_PASSWORD_HASH")
            .ok()
            .filter(|h| !h.trim().is_empty())?;

        Some(Self {
            password_hash: password_hash.trim().to_string(),
            jwt: JwtConfig::from_env(),
            throttle: ThrottleConfig::from_env(),
        })
    }
}
