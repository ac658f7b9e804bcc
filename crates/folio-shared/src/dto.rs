//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Query string accepted by `/api/blog`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogQueryParams {
    pub id: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

impl BlogQueryParams {
    /// The `id` parameter, treating an empty value as absent.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Request to open an admin session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Response carrying an admin session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub expires_at: String,
}

/// Response describing the caller's current session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    /// Whether mutations require a session at all.
    pub auth_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}
