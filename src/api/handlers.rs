//! HTTP request handlers for the compliance API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ExportConfig;
use crate::error::{ComplianceError, ComplianceResult};
use crate::export::{ExportArtifact, ExportFormat, export, select_export_days};
use crate::report::{ComplianceDetailView, ComplianceReport};

use super::request::{ExportRequest, SummaryRequest, TableRequest};
use super::response::{ApiError, ApiErrorResponse, TableResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/summary", post(summary_handler))
        .route("/summary/text", post(summary_text_handler))
        .route("/table", post(table_handler))
        .route("/export/:format", post(export_handler))
        .with_state(state)
}

/// Turns a body rejection into a `400` response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
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
    ApiErrorResponse::bad_request(error).into_response()
}

fn render_summary(request: &SummaryRequest) -> ComplianceReport {
    ComplianceDetailView::new(&request.result, request.modules)
        .with_metadata(request.metadata())
        .render()
}

/// Handler for POST /summary.
///
/// Returns the structured report of one day.
async fn summary_handler(payload: Result<Json<SummaryRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing summary request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let report = render_summary(&request);
    info!(
        correlation_id = %correlation_id,
        day = %report.day,
        empty_day = report.empty_day,
        sections = report.sections.len(),
        "Summary rendered"
    );

    (StatusCode::OK, Json(report)).into_response()
}

/// Handler for POST /summary/text.
///
/// Same input as `/summary`, rendered as icon-prefixed plain text.
async fn summary_text_handler(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing text summary request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let text = render_summary(&request).to_text(&state.config().report().icons);
    info!(
        correlation_id = %correlation_id,
        day = %request.result.day,
        "Text summary rendered"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        text,
    )
        .into_response()
}

/// Handler for POST /table.
///
/// Selects `selected_day` (or the first listed day) and returns its rows.
async fn table_handler(payload: Result<Json<TableRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing table request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let mut table = request.table();
    if let Some(day) = &request.selected_day {
        if !table.select_day(day) {
            warn!(
                correlation_id = %correlation_id,
                day = %day,
                "Selected day is not listed"
            );
            return ApiErrorResponse::from(ComplianceError::DayNotFound { day: day.clone() })
                .into_response();
        }
    }

    let response = TableResponse::from(&table);
    info!(
        correlation_id = %correlation_id,
        selected_day = ?response.selected_day,
        rows = response.rows.len(),
        "Table rendered"
    );

    (StatusCode::OK, Json(response)).into_response()
}

/// Handler for POST /export/{format}.
///
/// Returns the export file as an attachment.
async fn export_handler(
    State(state): State<AppState>,
    Path(format): Path<String>,
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, format = %format, "Processing export request");

    let format = match format.parse::<ExportFormat>() {
        Ok(format) => format,
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Unsupported export format");
            return ApiErrorResponse::from(error).into_response();
        }
    };

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    if request.label.trim().is_empty() {
        warn!(correlation_id = %correlation_id, "Empty export label");
        return ApiErrorResponse::bad_request(ApiError::validation_error(
            "label must not be empty",
        ))
        .into_response();
    }

    let start_time = Instant::now();
    match build_export(&request, format, state.config().export()) {
        Ok(artifact) => {
            info!(
                correlation_id = %correlation_id,
                file_name = %artifact.file_name,
                bytes = artifact.bytes.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Export completed successfully"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, artifact.mime_type.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        content_disposition(&artifact.file_name),
                    ),
                ],
                artifact.bytes,
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Export failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn build_export(
    request: &ExportRequest,
    format: ExportFormat,
    config: &ExportConfig,
) -> ComplianceResult<ExportArtifact> {
    let selection = select_export_days(&request.results, &request.scope())?;
    export(format, &request.label, &selection, config)
}

// Quotes, backslashes and control characters cannot appear in the quoted
// filename parameter.
fn content_disposition(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("attachment; filename=\"{}\"", safe)
}
