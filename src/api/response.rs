//! Response types for the Overtime Extraction Engine API.
//!
//! This module defines the success envelope and the error response
//! structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::OvertimeResult;

/// Success envelope for the `/extract` endpoint.
///
/// Wraps the engine result with request-scoped metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResponse {
    /// Unique identifier for this extraction.
    pub extraction_id: Uuid,
    /// When the extraction was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the extraction.
    pub engine_version: String,
    /// The extraction result.
    #[serde(flatten)]
    pub result: OvertimeResult,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InactivePolicy { name } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INACTIVE_POLICY",
                    format!("Overtime policy '{}' is not active", name),
                    "An inactive policy cannot be used for extraction",
                ),
            },
            EngineError::InvalidPolicy { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_POLICY",
                    format!("Invalid policy field '{}': {}", field, message),
                    "The policy contains invalid information",
                ),
            },
            EngineError::InvalidEntry {
                date,
                field,
                message,
            } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_ENTRY",
                    format!("Invalid entry on {}, field '{}': {}", date, field, message),
                    "The timesheet entry contains invalid information",
                ),
            },
            EngineError::PolicyNotFound { name } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "POLICY_NOT_FOUND",
                    format!("Overtime policy not found: {}", name),
                    "The requested policy is not loaded in the policy store",
                ),
            },
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_api_error_without_details_omits_field() {
        let error = ApiError::new("TEST", "message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details() {
        let error = ApiError::with_details("TEST", "message", "details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"details\""));
    }

    #[test]
    fn test_inactive_policy_maps_to_400() {
        let response: ApiErrorResponse = EngineError::InactivePolicy {
            name: "standard".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "INACTIVE_POLICY");
    }

    #[test]
    fn test_policy_not_found_maps_to_404() {
        let response: ApiErrorResponse = EngineError::PolicyNotFound {
            name: "missing".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error.code, "POLICY_NOT_FOUND");
    }

    #[test]
    fn test_invalid_entry_maps_to_400() {
        let response: ApiErrorResponse = EngineError::InvalidEntry {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            field: "break_minutes".to_string(),
            message: "break exceeds gross duration".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "INVALID_ENTRY");
    }

    #[test]
    fn test_config_errors_map_to_500() {
        let response: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "/missing".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, "CONFIG_ERROR");
    }
}
