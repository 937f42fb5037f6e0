//! Response envelopes
//!
//! Every successful call answers `{ "message": ..., "data": ... }`; every failure answers
//! `{ "code": ..., "message": ... }`.

use serde::{Deserialize, Serialize};

// =============================================================================
// Success envelope
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// A success that carries only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

// =============================================================================
// Error body
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Error classification codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // === Client Errors (4xx) ===
    /// Request body could not be decoded
    BadRequest,
    /// Request data failed validation
    ValidationError,
    /// A caller-supplied current value (email, password) did not match
    PreconditionFailed,
    /// Authentication required or failed
    Unauthorized,
    /// Caller lacks permission for this operation
    Forbidden,
    /// Requested resource not found
    NotFound,
    /// Operation conflicts with current state (duplicate key, stale revision)
    Conflict,

    // === Server Errors (5xx) ===
    /// Internal server error
    InternalError,

    /// Unknown variant for forward compatibility
    #[serde(other)]
    Unknown,
}

// NOTE: the HTTP status for each code is decided by the engine's HTTP layer.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_only_response_omits_data() {
        let json = serde_json::to_value(ApiResponse::message("Game deleted successfully!"))
            .unwrap();
        assert_eq!(json, serde_json::json!({ "message": "Game deleted successfully!" }));
    }

    #[test]
    fn error_codes_are_snake_case() {
        let json =
            serde_json::to_value(ErrorResponse::new(ErrorCode::PreconditionFailed, "nope"))
                .unwrap();
        assert_eq!(json["code"], "precondition_failed");
    }

    #[test]
    fn unknown_codes_decode_to_unknown() {
        let body: ErrorResponse =
            serde_json::from_str(r#"{"code":"teapot","message":"short and stout"}"#).unwrap();
        assert_eq!(body.code, ErrorCode::Unknown);
    }
}
