//! HTTP API module for the compliance service.
//!
//! This module provides the REST endpoints that render day summaries and
//! tables and serve export downloads.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ExportRequest, SummaryRequest, TableRequest};
pub use response::{ApiError, ApiErrorResponse, TableResponse};
pub use state::AppState;
