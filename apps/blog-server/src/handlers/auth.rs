//! Admin login handlers.

use actix_web::{HttpRequest, HttpResponse, web};

use folio_core::domain::timestamp;
use folio_core::ports::ThrottleStatus;
use folio_shared::dto::{LoginRequest, SessionResponse, SessionStatusResponse};

use crate::middleware::auth::AdminSession;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn locked_out(retry_after: std::time::Duration) -> AppError {
    AppError::LockedOut {
        retry_after_secs: retry_after.as_secs_f64().ceil() as u64,
    }
}

/// POST /api/auth/login
pub async fn login(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let admin = state
        .admin
        .as_ref()
        .ok_or_else(|| AppError::NotFound("Admin login is not configured".to_string()))?;

    // Keyed on the socket peer. Forwarded-for headers are client-supplied.
    let client = req
        .peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    if let ThrottleStatus::LockedOut { retry_after } = admin.throttle.check(&client).await {
        return Err(locked_out(retry_after));
    }

    let valid = admin
        .passwords
        .verify(&body.password, &admin.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        tracing::warn!(client = %client, "Admin login failed");
        return Err(match admin.throttle.record_failure(&client).await {
            ThrottleStatus::Allowed { remaining } => AppError::LoginFailed { remaining },
            ThrottleStatus::LockedOut { retry_after } => locked_out(retry_after),
        });
    }

    admin.throttle.record_success(&client).await;

    let session = admin
        .tokens
        .issue_session()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(client = %client, "Admin session issued");

    Ok(HttpResponse::Ok().json(SessionResponse {
        token: session.token,
        token_type: "Bearer".to_string(),
        expires_in: admin.tokens.expiration_seconds().max(0) as u64,
        expires_at: timestamp::format(&session.expires_at),
    }))
}

/// GET /api/auth/session - Protected when admin login is configured.
pub async fn session(admin: AdminSession) -> AppResult<HttpResponse> {
    let expires_at = admin
        .claims
        .as_ref()
        .and_then(|c| chrono::DateTime::from_timestamp(c.exp, 0))
        .map(|at| timestamp::format(&at));

    Ok(HttpResponse::Ok().json(SessionStatusResponse {
        auth_required: admin.claims.is_some(),
        expires_at,
    }))
}
