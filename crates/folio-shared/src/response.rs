//! Response bodies that are not domain objects.

use serde::{Deserialize, Serialize};

/// Error body: `{ "error": "<message>" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// A human-readable explanation of the failure.
    pub error: String,

    /// Failed login attempts left before lockout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_attempts: Option<u32>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            remaining_attempts: None,
        }
    }

    pub fn with_remaining_attempts(mut self, remaining: u32) -> Self {
        self.remaining_attempts = Some(remaining);
        self
    }

    // Common error constructors
    pub fn method_not_allowed() -> Self {
        Self::new("Method not allowed")
    }

    pub fn internal_error() -> Self {
        Self::new("Internal server error")
    }
}

/// Plain confirmation body: `{ "message": "<text>" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
