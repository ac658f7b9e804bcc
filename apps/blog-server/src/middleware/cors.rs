//! Permissive CORS headers sent on every response.

use actix_web::middleware::DefaultHeaders;

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// Headers added to every response unless a handler already set them.
pub fn default_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Content-Type", "application/json"))
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", ALLOWED_METHODS))
        .add(("Access-Control-Allow-Headers", ALLOWED_HEADERS))
}
