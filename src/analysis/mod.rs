//! Derived-data computations over a day's slices.
//!
//! This module contains the time helpers, the failure range merge with its
//! slot statistics, hour formatting and the VGC staffing heuristic. Every
//! function here is pure: the same slices always give the same result.

mod fail_ranges;
mod hours;
mod recommendation;
mod time_range;

pub use fail_ranges::{
    FailSummary, MergedFailRange, count_passed_bkr, count_unknown_vgc, is_empty_day,
    merge_fail_ranges,
};
pub use hours::minutes_to_hours_str;
pub use recommendation::{
    StaffMention, parse_vgc_failure_names, recommend_staff_from_details, tally_vgc_mentions,
};
pub use time_range::{minutes_to_time, time_to_minutes};
