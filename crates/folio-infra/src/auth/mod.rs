//! Admin authentication implementations.

mod jwt;
mod password;
mod throttle;

pub use jwt::{JwtConfig, JwtTokenService};
pub use password::Argon2PasswordService;
pub use throttle::{InMemoryLoginThrottle, ThrottleConfig};
