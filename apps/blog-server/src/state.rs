//! Application state - shared across all handlers.

use std::sync::Arc;

use folio_core::BlogService;
use folio_core::ports::{DocumentStore, LoginThrottle, PasswordService, TokenService};
use folio_infra::{InMemoryDocumentStore, JsonFileStore};

use crate::config::{AppConfig, StoreConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blog: Arc<BlogService>,
    pub admin: Option<Arc<AdminAuth>>,
}

/// Everything needed to verify the admin password and issue sessions.
pub struct AdminAuth {
    pub password_hash: String,
    pub passwords: Arc<dyn PasswordService>,
    pub tokens: Arc<dyn TokenService>,
    pub throttle: Arc<dyn LoginThrottle>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub fn new(config: &AppConfig) -> Self {
        let blog = Arc::new(BlogService::new(
            build_store(&config.store),
            config.store.corruption_policy,
        ));

        #[cfg(feature = "auth")]
        let admin = config.admin.as_ref().map(|admin| {
            tracing::info!(
                max_attempts = admin.throttle.max_attempts,
                session_hours = admin.jwt.session_hours,
                "Admin login enabled, blog mutations require a session"
            );
            Arc::new(AdminAuth {
                password_hash: admin.password_hash.clone(),
                passwords: Arc::new(folio_infra::Argon2PasswordService::new()),
                tokens: Arc::new(folio_infra::JwtTokenService::new(admin.jwt.clone())),
                throttle: Arc::new(folio_infra::InMemoryLoginThrottle::new(
                    admin.throttle.clone(),
                )),
            })
        });

        #[cfg(not(feature = "auth"))]
        let admin = None;

        if admin.is_none() {
            tracing::warn!("ADMIN_PASSWORD_HASH not set. Blog mutations are open to any client.");
        }

        tracing::info!("Application state initialized");

        Self { blog, admin }
    }
}

fn build_store(config: &StoreConfig) -> Arc<dyn DocumentStore> {
    match &config.data_path {
        Some(path) => {
            tracing::info!(path = %path.display(), policy = ?config.corruption_policy, "Using JSON file store");
            Arc::new(JsonFileStore::new(path.clone()))
        }
        None => {
            tracing::warn!("BLOG_STORE=memory. Posts are lost on restart.");
            Arc::new(InMemoryDocumentStore::new())
        }
    }
}
