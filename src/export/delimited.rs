//! CSV export.

use crate::config::CsvOptions;
use crate::error::{ComplianceError, ComplianceResult};
use crate::models::DayResult;

use super::{ExportArtifact, ExportFormat, ExportTable};

/// Writes all days into one CSV file.
///
/// The first column is the day key; the remaining columns are the export
/// column union with the shared cell formatting.
pub fn export_csv(
    label: &str,
    days: &[&DayResult],
    options: &CsvOptions,
) -> ComplianceResult<ExportArtifact> {
    let table = ExportTable::build(days);
    // Non-ASCII delimiters are rejected at config load.
    let delimiter = u8::try_from(options.delimiter).unwrap_or(b',');

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer
        .write_record(std::iter::once("Day").chain(table.columns.iter().map(String::as_str)))
        .map_err(|e| ComplianceError::serialization("csv", e))?;

    for sheet in &table.sheets {
        for row in &sheet.rows {
            let record = std::iter::once(sheet.day.clone()).chain(row.iter().map(|cell| cell.display()));
            writer
                .write_record(record)
                .map_err(|e| ComplianceError::serialization("csv", e))?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ComplianceError::serialization("csv", e))?;

    Ok(ExportArtifact::new(label, ExportFormat::Csv, bytes))
}
