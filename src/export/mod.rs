//! Export pipeline for check results.
//!
//! Every serializer is a pure function from a label and a selection of
//! days to an [`ExportArtifact`]: a file name, a MIME type and the file
//! bytes. Delivering the bytes (download, HTTP response) is up to the
//! caller.
//!
//! # Example
//!
//! ```
//! use ggd_compliance::config::ExportConfig;
//! use ggd_compliance::export::{ExportFormat, ExportScope, export, select_export_days};
//! use ggd_compliance::models::{DayResult, ModuleStatus, TimeSlice};
//!
//! let results = vec![DayResult::new(
//!     "03-02-2025",
//!     vec![TimeSlice::new("09:00", "09:15", ModuleStatus::No)],
//! )];
//!
//! let selection = select_export_days(&results, &ExportScope::AllDays).unwrap();
//! let artifact = export(ExportFormat::Csv, "week-6", &selection, &ExportConfig::default()).unwrap();
//! assert_eq!(artifact.file_name, "week-6.csv");
//! ```

mod delimited;
mod json;
mod pdf;
mod spreadsheet;
mod table;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ExportConfig;
use crate::error::{ComplianceError, ComplianceResult};
use crate::models::{DayResult, find_day};

pub use delimited::export_csv;
pub use json::export_json;
pub use pdf::export_pdf;
pub use spreadsheet::{MAX_SHEET_NAME_LEN, export_spreadsheet, sanitize_sheet_name};
pub use table::{DaySheet, ExportTable};

/// A finished export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Suggested file name, `{label}.{extension}`.
    pub file_name: String,
    /// MIME type of `bytes`.
    pub mime_type: &'static str,
    /// File content.
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    fn new(label: &str, format: ExportFormat, bytes: Vec<u8>) -> Self {
        Self {
            file_name: format!("{}.{}", label, format.extension()),
            mime_type: format.mime_type(),
            bytes,
        }
    }
}

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Excel workbook, one worksheet per day.
    Xlsx,
    /// One CSV file with a leading day column.
    Csv,
    /// Pretty-printed JSON.
    Json,
    /// PDF table, one page per day.
    Pdf,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// MIME type of the artifact.
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Json => "application/json;charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ComplianceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xlsx" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(ComplianceError::UnsupportedFormat {
                format: s.to_string(),
            }),
        }
    }
}

/// Which days an export covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportScope {
    /// Only the selected day; `None` when nothing is selected.
    SelectedDay(Option<String>),
    /// Every supplied day.
    AllDays,
}

/// The days chosen for an export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportSelection<'a> {
    /// A single selected day.
    Single(&'a DayResult),
    /// All supplied days, in input order.
    All(&'a [DayResult]),
}

impl<'a> ExportSelection<'a> {
    /// The selected days, in order.
    pub fn days(&self) -> Vec<&'a DayResult> {
        match *self {
            ExportSelection::Single(day) => vec![day],
            ExportSelection::All(days) => days.iter().collect(),
        }
    }
}

/// Resolves `scope` against `results`.
///
/// Fails with [`ComplianceError::NoDaySelected`] when a single-day export
/// has no selection, with [`ComplianceError::DayNotFound`] when the selected
/// day is not in `results`, and with [`ComplianceError::NoExportData`] when
/// an all-days export has nothing to export.
pub fn select_export_days<'a>(
    results: &'a [DayResult],
    scope: &ExportScope,
) -> ComplianceResult<ExportSelection<'a>> {
    match scope {
        ExportScope::SelectedDay(None) => Err(ComplianceError::NoDaySelected),
        ExportScope::SelectedDay(Some(day)) if day.trim().is_empty() => {
            Err(ComplianceError::NoDaySelected)
        }
        ExportScope::SelectedDay(Some(day)) => find_day(results, day)
            .map(ExportSelection::Single)
            .ok_or_else(|| ComplianceError::DayNotFound { day: day.clone() }),
        ExportScope::AllDays if results.is_empty() => Err(ComplianceError::NoExportData),
        ExportScope::AllDays => Ok(ExportSelection::All(results)),
    }
}

/// Writes `selection` in `format`.
pub fn export(
    format: ExportFormat,
    label: &str,
    selection: &ExportSelection<'_>,
    config: &ExportConfig,
) -> ComplianceResult<ExportArtifact> {
    let artifact = match format {
        ExportFormat::Xlsx => export_spreadsheet(label, &selection.days())?,
        ExportFormat::Csv => export_csv(label, &selection.days(), &config.csv)?,
        ExportFormat::Json => export_json(label, selection)?,
        ExportFormat::Pdf => export_pdf(label, &selection.days(), &config.pdf)?,
    };

    info!(
        format = %format,
        file_name = %artifact.file_name,
        days = selection.days().len(),
        bytes = artifact.bytes.len(),
        "Export written"
    );

    Ok(artifact)
}
