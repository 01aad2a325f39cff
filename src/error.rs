//! Error types for the compliance-check core.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while summarising or exporting
//! check results.

use thiserror::Error;

/// The main error type for the compliance-check core.
///
/// The two selection variants carry the exact notice text shown to a user
/// who asks for an export without a usable day.
///
/// # Example
///
/// ```
/// use ggd_compliance::error::ComplianceError;
///
/// assert_eq!(ComplianceError::NoDaySelected.to_string(), "Select date first");
/// ```
#[derive(Debug, Error)]
pub enum ComplianceError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An export of a single day was requested without a selected day.
    #[error("Select date first")]
    NoDaySelected,

    /// The selected day has no result in the supplied data.
    #[error("No data")]
    DayNotFound {
        /// The day key that was requested.
        day: String,
    },

    /// An export of all days was requested over an empty result list.
    #[error("No data to export")]
    NoExportData,

    /// The requested export format is not one of xlsx, csv, json or pdf.
    #[error("Unsupported export format: {format}")]
    UnsupportedFormat {
        /// The format as requested.
        format: String,
    },

    /// Writing an export artifact failed.
    #[error("Failed to write {format} export: {message}")]
    Serialization {
        /// The export format being written (e.g. "xlsx").
        format: &'static str,
        /// A description of the failure.
        message: String,
    },
}

impl ComplianceError {
    /// Builds a [`ComplianceError::Serialization`] from any displayable error.
    pub fn serialization(format: &'static str, err: impl std::fmt::Display) -> Self {
        ComplianceError::Serialization {
            format,
            message: err.to_string(),
        }
    }
}

/// A type alias for Results that return ComplianceError.
pub type ComplianceResult<T> = Result<T, ComplianceError>;
