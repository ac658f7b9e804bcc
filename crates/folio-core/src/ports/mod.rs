//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod store;

pub use auth::{
    AuthError, LoginThrottle, PasswordService, Session, SessionClaims, ThrottleStatus,
    TokenService,
};
pub use store::DocumentStore;
