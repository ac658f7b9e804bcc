//! Error handling - every failure becomes a status code plus `{ "error": ... }`.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use folio_core::DomainError;
use folio_shared::ErrorResponse;

/// Application-level error type that converts to JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Login failed, {remaining} attempts remaining")]
    LoginFailed { remaining: u32 },

    #[error("Locked out for {retry_after_secs} seconds")]
    LockedOut { retry_after_secs: u64 },

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{message}: {detail}")]
    Storage {
        message: &'static str,
        detail: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Map a domain error, reporting persistence failures as `message`.
    pub fn on_storage(message: &'static str) -> impl FnOnce(DomainError) -> AppError {
        move |err| match err {
            DomainError::Persistence(detail) => AppError::Storage { message, detail },
            other => other.into(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) | AppError::LoginFailed { .. } => StatusCode::UNAUTHORIZED,
            AppError::LockedOut { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Storage { .. } | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());

        let error = match self {
            AppError::NotFound(detail) | AppError::BadRequest(detail) => {
                ErrorResponse::new(detail.clone())
            }
            AppError::Unauthorized(detail) => ErrorResponse::new(detail.clone()),
            AppError::LoginFailed { remaining } => {
                ErrorResponse::new(format!("Invalid password. {remaining} attempts remaining."))
                    .with_remaining_attempts(*remaining)
            }
            AppError::LockedOut { retry_after_secs } => {
                builder.insert_header(("Retry-After", retry_after_secs.to_string()));
                let minutes = retry_after_secs.div_ceil(60);
                ErrorResponse::new(format!("Account is locked. Try again in {minutes} minutes."))
                    .with_remaining_attempts(0)
            }
            AppError::MethodNotAllowed => ErrorResponse::method_not_allowed(),
            AppError::Storage { message, detail } => {
                tracing::error!(detail = %detail, "{}", message);
                ErrorResponse::new(*message)
            }
            AppError::Internal(detail) => {
                // Log internal errors
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        builder.json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, .. } => {
                AppError::NotFound(format!("{entity_type} not found"))
            }
            DomainError::Persistence(detail) => AppError::Storage {
                message: "Failed to access blog data",
                detail,
            },
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(err: AppError) -> serde_json::Value {
        let response = err.error_response();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_rt::test]
    async fn test_not_found_maps_to_404_body() {
        let err = AppError::from(DomainError::post_not_found("7"));

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(err).await, serde_json::json!({ "error": "Post not found" }));
    }

    #[actix_rt::test]
    async fn test_storage_detail_is_not_leaked() {
        let map = AppError::on_storage("Failed to save blog post");
        let err = map(DomainError::Persistence("/srv/data: permission denied".to_string()));

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(err).await,
            serde_json::json!({ "error": "Failed to save blog post" })
        );
    }

    #[actix_rt::test]
    async fn test_lockout_sets_retry_after() {
        let response = AppError::LockedOut {
            retry_after_secs: 90,
        }
        .error_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get("Retry-After").unwrap(), "90");
    }
}
