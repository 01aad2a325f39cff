//! Slice table for one selected day.
//!
//! [`ResultTable`] holds the list of checked days, their results and a
//! single selected day. Changing the day list resets the selection to the
//! first day, so the table never points at a day that is no longer listed.

use serde::{Deserialize, Serialize};

use crate::models::{ActiveModules, DayResult, ModuleKey, ModuleStatus, TimeSlice, find_day};

/// One table row, built from one slice.
///
/// Counts and verdicts the slice does not carry are `None` and render as
/// blank cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// `"HH:MM-HH:MM"` as delivered.
    pub time: String,
    /// Children present.
    pub child_count: Option<u32>,
    /// Staff required.
    pub required_staff: Option<u32>,
    /// Staff present.
    pub staff_count: Option<u32>,
    /// BKR verdict label, blank when missing.
    pub bkr: String,
    /// VGC verdict label, when the VGC column is shown.
    pub vgc: Option<String>,
    /// Three-hour verdict label, when that column is shown.
    pub three_hours: Option<String>,
    /// Detail lines.
    pub details: Vec<String>,
}

fn label(status: Option<ModuleStatus>) -> String {
    status.map(|s| s.as_str().to_string()).unwrap_or_default()
}

fn count_cell(count: Option<u32>) -> String {
    count.map(|c| c.to_string()).unwrap_or_default()
}

impl TableRow {
    fn from_slice(slice: &TimeSlice, modules: ActiveModules) -> Self {
        Self {
            time: slice.time_range(),
            child_count: slice.child_count(),
            required_staff: slice.required_staff(),
            staff_count: slice.staff_count(),
            bkr: label(slice.bkr()),
            vgc: modules.contains(ModuleKey::Vgc).then(|| label(slice.vgc())),
            three_hours: modules.contains(ModuleKey::ThreeHours).then(|| {
                slice
                    .three_hours()
                    .map(|flag| flag.as_str().to_string())
                    .unwrap_or_default()
            }),
            details: slice.details().into_iter().map(str::to_string).collect(),
        }
    }

    /// The row as display cells, aligned with [`ResultTable::headers`].
    ///
    /// Detail lines share one cell, separated by newlines.
    pub fn cells(&self) -> Vec<String> {
        let mut cells = vec![
            self.time.clone(),
            count_cell(self.child_count),
            count_cell(self.required_staff),
            count_cell(self.staff_count),
            self.bkr.clone(),
        ];
        cells.extend(self.vgc.clone());
        cells.extend(self.three_hours.clone());
        cells.push(self.details.join("\n"));
        cells
    }
}

/// A rendered table for the selected day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedTable {
    /// The selected day.
    pub day: String,
    /// Column headers.
    pub headers: Vec<String>,
    /// One row per slice.
    pub rows: Vec<TableRow>,
}

/// Table state over a set of checked days.
///
/// # Example
///
/// ```
/// use ggd_compliance::models::{ActiveModules, DayResult, ModuleStatus, TimeSlice};
/// use ggd_compliance::report::ResultTable;
///
/// let results = vec![DayResult::new(
///     "03-02-2025",
///     vec![TimeSlice::new("09:00", "09:15", ModuleStatus::Pass)],
/// )];
/// let table = ResultTable::new(vec!["03-02-2025".to_string()], results, ActiveModules::bkr_only());
///
/// assert_eq!(table.selected_day(), Some("03-02-2025"));
/// assert_eq!(table.render().unwrap().rows.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    days: Vec<String>,
    results: Vec<DayResult>,
    modules: ActiveModules,
    selected_day: Option<String>,
}

impl ResultTable {
    /// Creates a table with the first day selected.
    pub fn new(days: Vec<String>, results: Vec<DayResult>, modules: ActiveModules) -> Self {
        let selected_day = days.first().cloned();
        Self {
            days,
            results,
            modules,
            selected_day,
        }
    }

    /// Replaces the day list and selects its first day.
    pub fn set_days(&mut self, days: Vec<String>) {
        self.selected_day = days.first().cloned();
        self.days = days;
    }

    /// Replaces the results without touching the selection.
    pub fn set_results(&mut self, results: Vec<DayResult>) {
        self.results = results;
    }

    /// Changes which module columns are shown.
    pub fn set_modules(&mut self, modules: ActiveModules) {
        self.modules = modules;
    }

    /// Selects `day` if it is in the day list. Returns whether it was.
    pub fn select_day(&mut self, day: &str) -> bool {
        if self.days.iter().any(|d| d == day) {
            self.selected_day = Some(day.to_string());
            true
        } else {
            false
        }
    }

    /// The listed days, in caller order.
    pub fn days(&self) -> &[String] {
        &self.days
    }

    /// The selected day.
    pub fn selected_day(&self) -> Option<&str> {
        self.selected_day.as_deref()
    }

    /// The result of the selected day, if there is one.
    pub fn selected_result(&self) -> Option<&DayResult> {
        find_day(&self.results, self.selected_day.as_deref()?)
    }

    /// Column headers for the active modules.
    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec!["Time", "#Children", "Required staff", "#Staff", "BKR"];
        if self.modules.contains(ModuleKey::Vgc) {
            headers.push("VGC");
        }
        if self.modules.contains(ModuleKey::ThreeHours) {
            headers.push("3-UURS");
        }
        headers.push("Details");
        headers.into_iter().map(str::to_string).collect()
    }

    /// Rows of the selected day, empty when there is nothing to show.
    pub fn rows(&self) -> Vec<TableRow> {
        self.selected_result()
            .map(|result| {
                result
                    .slices
                    .iter()
                    .map(|slice| TableRow::from_slice(slice, self.modules))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Renders the selected day, or `None` when it has no slices.
    pub fn render(&self) -> Option<RenderedTable> {
        let result = self.selected_result()?;
        if result.slices.is_empty() {
            return None;
        }
        Some(RenderedTable {
            day: result.day.clone(),
            headers: self.headers(),
            rows: self.rows(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ThreeHourFlag;
    use serde_json::json;

    fn day(key: &str, slices: usize) -> DayResult {
        let slices = (0..slices)
            .map(|i| {
                let from = 9 * 60 + i as u32 * 15;
                let mut slice = TimeSlice::new(
                    crate::analysis::minutes_to_time(from),
                    crate::analysis::minutes_to_time(from + 15),
                    ModuleStatus::Pass,
                );
                slice.set_counts(8, 2, 2);
                slice.set_status(ModuleKey::Vgc, ModuleStatus::No);
                slice.set_details(vec!["VGC failed: Anna for Child 1".to_string(), "extra".to_string()]);
                slice
            })
            .collect();
        DayResult::new(key, slices)
    }

    fn days(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_defaults_to_first_day() {
        let table = ResultTable::new(
            days(&["04-02-2025", "03-02-2025"]),
            vec![day("03-02-2025", 1), day("04-02-2025", 2)],
            ActiveModules::bkr_only(),
        );
        assert_eq!(table.selected_day(), Some("04-02-2025"));
        assert_eq!(table.rows().len(), 2);
    }

    #[test]
    fn test_changing_days_resets_selection() {
        let mut table = ResultTable::new(
            days(&["03-02-2025", "04-02-2025"]),
            vec![day("03-02-2025", 1), day("04-02-2025", 2)],
            ActiveModules::bkr_only(),
        );
        assert!(table.select_day("04-02-2025"));
        assert_eq!(table.selected_day(), Some("04-02-2025"));

        table.set_days(days(&["03-02-2025"]));
        assert_eq!(table.selected_day(), Some("03-02-2025"));

        table.set_days(vec![]);
        assert_eq!(table.selected_day(), None);
        assert!(table.render().is_none());
    }

    #[test]
    fn test_select_unknown_day_is_rejected() {
        let mut table = ResultTable::new(
            days(&["03-02-2025"]),
            vec![day("03-02-2025", 1)],
            ActiveModules::bkr_only(),
        );
        assert!(!table.select_day("09-09-2025"));
        assert_eq!(table.selected_day(), Some("03-02-2025"));
    }

    #[test]
    fn test_headers_follow_modules() {
        let mut table = ResultTable::default();
        assert_eq!(
            table.headers(),
            vec!["Time", "#Children", "Required staff", "#Staff", "BKR", "Details"]
        );
        table.set_modules(ActiveModules::all());
        assert_eq!(
            table.headers(),
            vec!["Time", "#Children", "Required staff", "#Staff", "BKR", "VGC", "3-UURS", "Details"]
        );
    }

    #[test]
    fn test_row_cells_align_with_headers() {
        let mut result = day("03-02-2025", 1);
        result.slices[0].set_three_hours(ThreeHourFlag::Yes);
        let table = ResultTable::new(days(&["03-02-2025"]), vec![result], ActiveModules::all());

        let rendered = table.render().unwrap();
        let cells = rendered.rows[0].cells();

        assert_eq!(cells.len(), rendered.headers.len());
        assert_eq!(
            cells,
            vec![
                "09:00-09:15",
                "8",
                "2",
                "2",
                "Pass",
                "No",
                "Yes",
                "VGC failed: Anna for Child 1\nextra"
            ]
        );
    }

    #[test]
    fn test_hidden_module_columns_are_absent_from_rows() {
        let table = ResultTable::new(
            days(&["03-02-2025"]),
            vec![day("03-02-2025", 1)],
            ActiveModules::bkr_only(),
        );
        let row = &table.rows()[0];
        assert_eq!(row.vgc, None);
        assert_eq!(row.three_hours, None);
        assert_eq!(row.cells().len(), 6);
    }

    #[test]
    fn test_missing_fields_render_blank_cells() {
        let sparse: TimeSlice = serde_json::from_value(json!({
            "From Time": "09:00",
            "To Time": "09:15",
            "#Children": null,
            "RequiredStaff": 1.5,
            "#Staff": 1,
            "VGC": "Later",
            "Details": null
        }))
        .unwrap();
        let table = ResultTable::new(
            days(&["03-02-2025"]),
            vec![DayResult::new("03-02-2025", vec![sparse])],
            ActiveModules::all(),
        );

        let cells = table.rows()[0].cells();
        assert_eq!(cells, vec!["09:00-09:15", "", "", "1", "", "Unknown", "", ""]);
    }

    #[test]
    fn test_missing_or_empty_result_renders_nothing() {
        let table = ResultTable::new(
            days(&["05-02-2025"]),
            vec![day("03-02-2025", 1)],
            ActiveModules::bkr_only(),
        );
        assert!(table.render().is_none());
        assert!(table.rows().is_empty());

        let empty = ResultTable::new(
            days(&["03-02-2025"]),
            vec![day("03-02-2025", 0)],
            ActiveModules::bkr_only(),
        );
        assert!(empty.render().is_none());
    }
}
