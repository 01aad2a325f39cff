//! Failure range merging and slot statistics.
//!
//! This module collapses the failing slices of one module into maximal
//! contiguous time windows and counts the slots behind the report's
//! per-day statistics.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{ModuleKey, ModuleStatus, TimeSlice};

use super::hours::minutes_to_hours_str;
use super::time_range::minutes_to_time;

/// A maximal contiguous run of failing slices for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedFailRange {
    /// Window label, `"HH:MM-HH:MM"`.
    pub text: String,
    /// Start of the window in minutes since midnight.
    pub start_minutes: u32,
    /// End of the window in minutes since midnight.
    pub end_minutes: u32,
    /// Length of the window in minutes.
    pub duration_minutes: u32,
}

impl MergedFailRange {
    fn new(start_minutes: u32, end_minutes: u32) -> Self {
        Self {
            text: format!(
                "{}-{}",
                minutes_to_time(start_minutes),
                minutes_to_time(end_minutes)
            ),
            start_minutes,
            end_minutes,
            duration_minutes: end_minutes.saturating_sub(start_minutes),
        }
    }
}

/// Aggregate failures of one module over a day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FailSummary {
    /// Merged failure windows, in time order.
    pub ranges: Vec<MergedFailRange>,
    /// Sum of the failing slices' own lengths.
    pub total_fail_minutes: u32,
    /// Number of failing slices.
    pub failing_slot_count: usize,
}

impl FailSummary {
    /// Returns true if the module had no failing slice.
    pub fn is_empty(&self) -> bool {
        self.failing_slot_count == 0
    }

    /// The failing time as an hour string, e.g. `"1.5"`.
    pub fn total_fail_hours(&self) -> String {
        minutes_to_hours_str(self.total_fail_minutes)
    }

    /// The range labels, in time order.
    pub fn range_texts(&self) -> Vec<&str> {
        self.ranges.iter().map(|range| range.text.as_str()).collect()
    }
}

/// Merges the failing slices of `module` into contiguous windows.
///
/// Slices whose verdict for `module` is `No` are sorted by start time.
/// A slice extends the current window only when it starts exactly where
/// that window ends; any gap, including a passing slice in between, starts
/// a new window. Failing slices with unparseable times are counted as
/// slots but contribute no minutes and no window.
///
/// # Examples
///
/// ```
/// use ggd_compliance::analysis::merge_fail_ranges;
/// use ggd_compliance::models::{ModuleKey, ModuleStatus, TimeSlice};
///
/// let slices = vec![
///     TimeSlice::new("09:00", "09:15", ModuleStatus::No),
///     TimeSlice::new("09:15", "09:30", ModuleStatus::No),
///     TimeSlice::new("09:45", "10:00", ModuleStatus::No),
/// ];
///
/// let summary = merge_fail_ranges(&slices, ModuleKey::Bkr);
/// assert_eq!(summary.range_texts(), vec!["09:00-09:30", "09:45-10:00"]);
/// assert_eq!(summary.total_fail_minutes, 45);
/// assert_eq!(summary.failing_slot_count, 3);
/// ```
pub fn merge_fail_ranges(slices: &[TimeSlice], module: ModuleKey) -> FailSummary {
    let failing: Vec<&TimeSlice> = slices
        .iter()
        .filter(|slice| slice.status(module) == Some(ModuleStatus::No))
        .collect();

    if failing.is_empty() {
        return FailSummary::default();
    }

    let mut bounds: Vec<(u32, u32)> = failing
        .iter()
        .filter_map(|slice| match (slice.from_minutes(), slice.to_minutes()) {
            (Some(from), Some(to)) => Some((from, to)),
            _ => {
                warn!(
                    module = module.field_name(),
                    from = slice.from_time().unwrap_or_default(),
                    to = slice.to_time().unwrap_or_default(),
                    "Skipping failing slice with unparseable times"
                );
                None
            }
        })
        .collect();
    bounds.sort_by_key(|&(from, _)| from);

    let mut total_fail_minutes = 0;
    let mut windows: Vec<(u32, u32)> = Vec::new();
    for (from, to) in bounds {
        total_fail_minutes += to.saturating_sub(from);
        match windows.last_mut() {
            Some(current) if current.1 == from => current.1 = current.1.max(to),
            _ => windows.push((from, to)),
        }
    }

    let ranges: Vec<MergedFailRange> = windows
        .into_iter()
        .map(|(start, end)| MergedFailRange::new(start, end))
        .collect();

    debug!(
        module = module.field_name(),
        failing_slots = failing.len(),
        ranges = ranges.len(),
        total_fail_minutes,
        "Merged fail ranges"
    );

    FailSummary {
        ranges,
        total_fail_minutes,
        failing_slot_count: failing.len(),
    }
}

/// Number of slices whose BKR verdict is `Pass`.
pub fn count_passed_bkr(slices: &[TimeSlice]) -> usize {
    slices
        .iter()
        .filter(|slice| slice.bkr() == Some(ModuleStatus::Pass))
        .count()
}

/// Number of slices whose VGC verdict is `Unknown`.
///
/// These slots are neither passes nor failures; the report mentions them
/// in a footnote.
pub fn count_unknown_vgc(slices: &[TimeSlice]) -> usize {
    slices
        .iter()
        .filter(|slice| slice.vgc() == Some(ModuleStatus::Unknown))
        .count()
}

/// The "empty day" flag: every slice passes BKR.
///
/// The backend reports a day without children as all-passing, so this is
/// what the report treats as "no child present". It also holds for a day
/// with children where every slot passes, and for a day with no slices.
pub fn is_empty_day(slices: &[TimeSlice]) -> bool {
    count_passed_bkr(slices) == slices.len()
}
