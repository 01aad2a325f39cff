//! Tabular view of slices shared by the spreadsheet, CSV and PDF exports.
//!
//! Slices do not all carry the same fields, so the exported column set is
//! the union of every field seen across all exported days, in first-seen
//! order. Each slice is then laid out against that column set, with absent
//! fields as [`CellValue::Null`].

use crate::models::{CellValue, DayResult};

/// The rows of one exported day.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySheet {
    /// The day key.
    pub day: String,
    /// One row per slice, aligned with [`ExportTable::columns`].
    pub rows: Vec<Vec<CellValue>>,
}

/// The column set and per-day rows of an export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    /// Column names, in first-seen order without duplicates.
    pub columns: Vec<String>,
    /// One sheet per exported day, in input order.
    pub sheets: Vec<DaySheet>,
}

impl ExportTable {
    /// Builds the table for `days`.
    ///
    /// # Example
    ///
    /// ```
    /// use ggd_compliance::export::ExportTable;
    /// use ggd_compliance::models::{DayResult, ModuleKey, ModuleStatus, TimeSlice};
    ///
    /// let mut with_vgc = TimeSlice::new("09:15", "09:30", ModuleStatus::Pass);
    /// with_vgc.set_status(ModuleKey::Vgc, ModuleStatus::No);
    /// let first = DayResult::new("03-02-2025", vec![TimeSlice::new("09:00", "09:15", ModuleStatus::No)]);
    /// let second = DayResult::new("04-02-2025", vec![with_vgc]);
    ///
    /// let table = ExportTable::build(&[&first, &second]);
    /// assert!(table.columns.contains(&"VGC".to_string()));
    /// assert_eq!(table.sheets[0].rows[0].len(), table.columns.len());
    /// ```
    pub fn build(days: &[&DayResult]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        let mut keyed_days = Vec::with_capacity(days.len());

        for day in days {
            let mut keyed_rows = Vec::with_capacity(day.slices.len());
            for slice in &day.slices {
                let cells = slice.to_cells();
                for (key, _) in &cells {
                    if !columns.iter().any(|column| column == key) {
                        columns.push(key.clone());
                    }
                }
                keyed_rows.push(cells);
            }
            keyed_days.push((day.day.clone(), keyed_rows));
        }

        let sheets = keyed_days
            .into_iter()
            .map(|(day, keyed_rows)| DaySheet {
                day,
                rows: keyed_rows
                    .into_iter()
                    .map(|cells| align_row(&columns, cells))
                    .collect(),
            })
            .collect();

        Self { columns, sheets }
    }
}

fn align_row(columns: &[String], mut cells: Vec<(String, CellValue)>) -> Vec<CellValue> {
    columns
        .iter()
        .map(|column| {
            cells
                .iter()
                .position(|(key, _)| key == column)
                .map(|index| cells.swap_remove(index).1)
                .unwrap_or(CellValue::Null)
        })
        .collect()
}
