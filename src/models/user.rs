// src/models/user.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Server-assigned user identifier. Opaque to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

/// Whether credentials should sign in an existing user or create a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    Login,
    Register,
}

/// DTO for `POST /api/login`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 64, message = "Please enter a username."))]
    pub username: String,
    pub mode: AuthMode,
}

impl LoginRequest {
    /// Builds a request from raw input. Surrounding whitespace is trimmed.
    pub fn new(username: &str, mode: AuthMode) -> Self {
        Self {
            username: username.trim().to_string(),
            mode,
        }
    }

    /// First validation message, if the request is not acceptable.
    pub fn rejection(&self) -> Option<String> {
        let errors = self.validate().err()?;
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Please enter a username.".to_string());
        Some(message)
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStart {
    pub username: String,
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_trimmed() {
        let req = LoginRequest::new("  alice \n", AuthMode::Login);
        assert_eq!(req.username, "alice");
        assert!(req.rejection().is_none());
    }

    #[test]
    fn blank_username_is_rejected() {
        let req = LoginRequest::new("   ", AuthMode::Register);
        assert_eq!(req.rejection().as_deref(), Some("Please enter a username."));
    }

    #[test]
    fn mode_serializes_lowercase() {
        let req = LoginRequest::new("bob", AuthMode::Register);
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body, serde_json::json!({"username": "bob", "mode": "register"}));
    }
}
