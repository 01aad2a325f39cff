//! Excel workbook export.

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::error::{ComplianceError, ComplianceResult};
use crate::models::DayResult;

use super::{ExportArtifact, ExportFormat, ExportTable};

/// Longest worksheet name a workbook accepts.
pub const MAX_SHEET_NAME_LEN: usize = 31;

const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Makes `name` a valid worksheet name.
///
/// Forbidden characters become `_`, surrounding apostrophes and whitespace
/// are dropped and the result is cut to [`MAX_SHEET_NAME_LEN`] characters.
/// Returns `None` if nothing usable is left.
///
/// # Examples
///
/// ```
/// use ggd_compliance::export::sanitize_sheet_name;
///
/// assert_eq!(sanitize_sheet_name("03/02/2025").as_deref(), Some("03_02_2025"));
/// assert_eq!(sanitize_sheet_name("  ").as_deref(), None);
/// ```
pub fn sanitize_sheet_name(name: &str) -> Option<String> {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if FORBIDDEN_SHEET_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    let trimmed = cleaned.trim().trim_matches('\'').trim();
    let truncated: String = trimmed.chars().take(MAX_SHEET_NAME_LEN).collect();
    let truncated = truncated.trim_end().trim_end_matches('\'').to_string();

    (!truncated.is_empty()).then_some(truncated)
}

// Sheet names compare case-insensitively in a workbook.
fn unique_sheet_name(day: &str, index: usize, used: &mut Vec<String>) -> String {
    let base = sanitize_sheet_name(day).unwrap_or_else(|| format!("Sheet{}", index + 1));
    let mut candidate = base.clone();
    let mut counter = 2;
    while used.iter().any(|name| name.eq_ignore_ascii_case(&candidate)) {
        let suffix = format!(" ({})", counter);
        let room = MAX_SHEET_NAME_LEN - suffix.chars().count();
        let stem: String = base.chars().take(room).collect();
        candidate = format!("{}{}", stem.trim_end(), suffix);
        counter += 1;
    }
    used.push(candidate.clone());
    candidate
}

/// Writes one worksheet per day.
///
/// Every sheet starts with a bold header row holding the export column
/// union. Numbers are written as numeric cells, everything else as text.
pub fn export_spreadsheet(label: &str, days: &[&DayResult]) -> ComplianceResult<ExportArtifact> {
    let table = ExportTable::build(days);
    let bytes = write_workbook(&table).map_err(|e| ComplianceError::serialization("xlsx", e))?;
    Ok(ExportArtifact::new(label, ExportFormat::Xlsx, bytes))
}

fn write_workbook(table: &ExportTable) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let mut used_names = Vec::with_capacity(table.sheets.len());

    for (index, sheet) in table.sheets.iter().enumerate() {
        let name = unique_sheet_name(&sheet.day, index, &mut used_names);
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name.as_str())?;

        for (col, column) in table.columns.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, column.as_str(), &header_format)?;
        }

        for (row_index, row) in sheet.rows.iter().enumerate() {
            let row_num = row_index as u32 + 1;
            for (col, cell) in row.iter().enumerate() {
                match cell.as_f64() {
                    Some(number) => {
                        worksheet.write_number(row_num, col as u16, number)?;
                    }
                    None => {
                        worksheet.write_string(row_num, col as u16, cell.display().as_str())?;
                    }
                }
            }
        }
    }

    workbook.save_to_buffer()
}
