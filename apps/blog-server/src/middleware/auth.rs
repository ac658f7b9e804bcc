//! Admin session extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use folio_core::ports::{AuthError, SessionClaims};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Proof that the caller may mutate the blog.
///
/// When admin login is not configured every request passes with `claims: None`.
/// Use this in handlers to guard mutations:
/// ```ignore
/// async fn create(_admin: AdminSession, body: web::Json<NewPost>) -> AppResult<HttpResponse> { ... }
/// ```
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub claims: Option<SessionClaims>,
}

impl AdminSession {
    pub fn session_id(&self) -> Option<&str> {
        self.claims.as_ref().map(|c| c.session_id.as_str())
    }
}

fn auth_error(err: AuthError) -> AppError {
    let detail = match err {
        AuthError::TokenExpired => "Your admin session has expired. Please login again.",
        AuthError::MissingAuth => {
            "Please provide a valid Bearer token in the Authorization header."
        }
        _ => "Invalid admin session token.",
    };
    AppError::Unauthorized(detail.to_string())
}

fn extract(req: &HttpRequest) -> Result<AdminSession, AppError> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        tracing::error!("AppState not found in app data");
        AppError::Internal("Server configuration error".to_string())
    })?;

    let Some(admin) = state.admin.as_ref() else {
        return Ok(AdminSession { claims: None });
    };

    // Parse "Bearer <token>"
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)
        .and_then(|value| {
            value
                .to_str()
                .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))
        })
        .and_then(|value| {
            value
                .strip_prefix("Bearer ")
                .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
        })
        .map_err(auth_error)?;

    let claims = admin.tokens.validate_session(token).map_err(|e| {
        tracing::warn!(error = %e, "Rejected admin session token");
        auth_error(e)
    })?;

    Ok(AdminSession {
        claims: Some(claims),
    })
}

impl FromRequest for AdminSession {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}
