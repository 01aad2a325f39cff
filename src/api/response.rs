//! Response types for the compliance API.
//!
//! This module defines the error response structures, the table response
//! and the mapping from [`ComplianceError`] to HTTP errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::ComplianceError;
use crate::report::{RenderedTable, ResultTable, TableRow};

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

    /// Creates an unsupported export format error response.
    pub fn unsupported_format(message: impl Into<String>) -> Self {
        Self::with_details(
            "UNSUPPORTED_FORMAT",
            message,
            "Supported formats are xlsx, csv, json and pdf",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A `400 Bad Request` carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<ComplianceError> for ApiErrorResponse {
    fn from(error: ComplianceError) -> Self {
        let message = error.to_string();
        match error {
            ComplianceError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            ComplianceError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            ComplianceError::NoDaySelected => ApiErrorResponse::bad_request(ApiError::new(
                "NO_DAY_SELECTED",
                message,
            )),
            ComplianceError::DayNotFound { day } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "DAY_NOT_FOUND",
                    message,
                    format!("No result was supplied for day '{}'", day),
                ))
            }
            ComplianceError::NoExportData => {
                ApiErrorResponse::bad_request(ApiError::new("NO_EXPORT_DATA", message))
            }
            ComplianceError::UnsupportedFormat { .. } => {
                ApiErrorResponse::bad_request(ApiError::unsupported_format(message))
            }
            ComplianceError::Serialization { format, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "EXPORT_FAILED",
                    format!("Failed to write {} export", format),
                    message,
                ),
            },
        }
    }
}

/// Body of a `/table` response.
///
/// `headers` and `rows` are empty when the selected day has no data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableResponse {
    /// The listed days, in caller order.
    pub days: Vec<String>,
    /// The selected day.
    pub selected_day: Option<String>,
    /// Column headers.
    pub headers: Vec<String>,
    /// One row per slice of the selected day.
    pub rows: Vec<TableRow>,
}

impl From<&ResultTable> for TableResponse {
    fn from(table: &ResultTable) -> Self {
        let (headers, rows) = match table.render() {
            Some(RenderedTable { headers, rows, .. }) => (headers, rows),
            None => (Vec::new(), Vec::new()),
        };
        Self {
            days: table.days().to_vec(),
            selected_day: table.selected_day().map(str::to_string),
            headers,
            rows,
        }
    }
}
