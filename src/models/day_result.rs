//! Day result model.
//!
//! A [`DayResult`] is everything one check run produced for a single day.
//! It is never mutated after it arrives; it is only summarised, tabulated
//! or exported.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

use super::{ThreeHourFlag, TimeSlice};

/// Date format of the day key, e.g. `"14-03-2025"`.
pub const DAY_KEY_FORMAT: &str = "%d-%m-%Y";

/// Day-level outcome of the three-hour rule, computed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreeHourSummary {
    /// Whether the day respects the rule.
    #[serde(rename = "3-UURS", default, deserialize_with = "null_as_default")]
    pub verdict: ThreeHourFlag,
    /// Free-text explanation of the verdict.
    #[serde(rename = "Reason", default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Individual deviations found on the day.
    #[serde(
        rename = "Deviations",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub deviations: Vec<String>,
}

/// One day's full check outcome.
///
/// # Example
///
/// ```
/// use ggd_compliance::models::DayResult;
/// use chrono::NaiveDate;
///
/// let result: DayResult = serde_json::from_str(r#"{"day": "14-03-2025", "slices": []}"#).unwrap();
/// assert_eq!(result.date(), NaiveDate::from_ymd_opt(2025, 3, 14));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayResult {
    /// The day key, `DD-MM-YYYY`.
    pub day: String,
    /// The day's slices in backend order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub slices: Vec<TimeSlice>,
    /// The three-hour rule summary, when that module was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub three_uurs_summary: Option<ThreeHourSummary>,
}

impl DayResult {
    /// Creates a day result without a three-hour summary.
    pub fn new(day: impl Into<String>, slices: Vec<TimeSlice>) -> Self {
        Self {
            day: day.into(),
            slices,
            three_uurs_summary: None,
        }
    }

    /// Parses the day key as a calendar date.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.day.trim(), DAY_KEY_FORMAT).ok()
    }

    /// Returns the weekday of the day key, if it parses.
    pub fn weekday(&self) -> Option<Weekday> {
        self.date().map(|date| date.weekday())
    }
}

// `null` reads like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Finds the result for `day` in `results`.
pub fn find_day<'a>(results: &'a [DayResult], day: &str) -> Option<&'a DayResult> {
    results.iter().find(|result| result.day == day)
}
