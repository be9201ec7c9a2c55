//! API error types
//!
//! Errors are reserved for input the caller controls: an unknown tool name,
//! parameters of the wrong shape, or an invalid snapshot payload. Missing
//! records are ordinary results, not errors.

use serde::Serialize;

use crate::core::ports::BridgeError;

/// Error codes reported in the response envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// No tool with the requested name
    UnknownTool,
    /// Parameters are missing or malformed
    BadRequest,
    /// Something outside the caller's control failed
    Internal,
}

impl ErrorCode {
    /// Get the error code string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownTool => "UNKNOWN_TOOL",
            Self::BadRequest => "BAD_REQUEST",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

/// API error with code and message
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    /// Create an unknown tool error
    #[must_use]
    pub fn unknown_tool(name: &str) -> Self {
        Self {
            code: ErrorCode::UnknownTool,
            message: format!("Unknown tool '{name}'"),
        }
    }

    /// Create a bad request error
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::BadRequest,
            message: message.into(),
        }
    }

    /// Create an internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Internal,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<BridgeError> for ApiError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::InvalidPayload(_) => Self::bad_request(err.to_string()),
            BridgeError::Io(_) | BridgeError::Json(_) => Self::internal(err.to_string()),
        }
    }
}

/// Serializable error data for JSON responses
#[derive(Debug, Serialize)]
pub struct ApiErrorData {
    /// Error code string
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl From<&ApiError> for ApiErrorData {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.code.as_str().to_string(),
            message: err.message.clone(),
        }
    }
}
