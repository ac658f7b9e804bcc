//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use folio_core::domain::timestamp;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub admin_login: bool,
}

/// Health check endpoint - returns server status.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let response = HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: timestamp::format(&chrono::Utc::now()),
        admin_login: state.admin.is_some(),
    };

    HttpResponse::Ok().json(response)
}
