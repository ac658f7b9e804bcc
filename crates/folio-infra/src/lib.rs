//! # Folio Infrastructure
//!
//! Concrete implementations of the ports defined in `folio-core`.
//! This crate contains the document stores and the admin authentication services.
//!
//! ## Feature Flags
//!
//! - `auth` (default) - Argon2 password checks, JWT sessions, login throttling
//! - `minimal` - Document stores only

pub mod store;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - Stores
pub use store::{InMemoryDocumentStore, JsonFileStore};

#[cfg(feature = "auth")]
pub use auth::{
    Argon2PasswordService, InMemoryLoginThrottle, JwtConfig, JwtTokenService, ThrottleConfig,
};
