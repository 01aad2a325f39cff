//! Request types for the compliance API.
//!
//! Day results travel in the same shape the checking service produces
//! them, so a result can be posted back unchanged.

use serde::{Deserialize, Serialize};

use crate::export::ExportScope;
use crate::models::{ActiveModules, DayResult};
use crate::report::{DisplayMetadata, ResultTable};

/// Request body for `/summary` and `/summary/text`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// The day to summarise.
    pub result: DayResult,
    /// Modules to report on; BKR only when omitted.
    #[serde(default)]
    pub modules: ActiveModules,
    /// Group name shown in the heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    /// Group type shown in the heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_type: Option<String>,
}

impl SummaryRequest {
    /// The heading labels of this request.
    pub fn metadata(&self) -> DisplayMetadata {
        DisplayMetadata {
            group_name: self.group_name.clone(),
            group_type: self.group_type.clone(),
        }
    }
}

/// Request body for `/table`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRequest {
    /// Day keys in display order.
    pub days: Vec<String>,
    /// Results for (some of) those days.
    #[serde(default)]
    pub results: Vec<DayResult>,
    /// Module columns to show; BKR only when omitted.
    #[serde(default)]
    pub modules: ActiveModules,
    /// Day to show; the first listed day when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_day: Option<String>,
}

impl TableRequest {
    /// Builds the table with the default (first-day) selection.
    ///
    /// The requested `selected_day` is applied by the caller so that an
    /// unlisted day can be reported.
    pub fn table(&self) -> ResultTable {
        ResultTable::new(self.days.clone(), self.results.clone(), self.modules)
    }
}

/// Request body for `/export/{format}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    /// File name stem of the download.
    pub label: String,
    /// All results on hand.
    pub results: Vec<DayResult>,
    /// The selected day, used unless `all_days` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_day: Option<String>,
    /// Export every result instead of the selected day.
    #[serde(default)]
    pub all_days: bool,
}

impl ExportRequest {
    /// Which days this request exports.
    pub fn scope(&self) -> ExportScope {
        if self.all_days {
            ExportScope::AllDays
        } else {
            ExportScope::SelectedDay(self.selected_day.clone())
        }
    }
}
