//! HTTP request handlers for the Overtime Extraction Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::extract_overtime;
use crate::models::{OvertimePolicy, TimesheetEntry};

use super::request::{ExtractionRequest, PolicySelector};
use super::response::{ApiError, ApiErrorResponse, ExtractionResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/extract", post(extract_handler))
        .with_state(state)
}

/// Handler for the POST /extract endpoint.
///
/// Accepts an extraction request and returns the computed overtime result.
async fn extract_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExtractionRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing extraction request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    // Resolve the policy: by store name or inline definition
    let policy: OvertimePolicy = match request.policy {
        PolicySelector::Name(name) => match state.policies().get(&name) {
            Ok(policy) => policy.clone(),
            Err(err) => {
                warn!(
                    correlation_id = %correlation_id,
                    policy = %name,
                    "Policy not found"
                );
                let api_error: ApiErrorResponse = err.into();
                return (
                    api_error.status,
                    [(header::CONTENT_TYPE, "application/json")],
                    Json(api_error.error),
                )
                    .into_response();
            }
        },
        PolicySelector::Inline(inline) => inline.into(),
    };

    let entries: Vec<TimesheetEntry> = request.entries.into_iter().map(Into::into).collect();

    match extract_overtime(&entries, &policy) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                policy = %policy.name,
                entries_count = entries.len(),
                overtime_minutes = result.totals.overtime_minutes,
                issues = result.issues.len(),
                "Extraction completed successfully"
            );
            let response = ExtractionResponse {
                extraction_id: correlation_id,
                timestamp: Utc::now(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                result,
            };
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(response),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Extraction failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}
