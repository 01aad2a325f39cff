//! Core data models for the compliance-check core.
//!
//! This module contains the check results as delivered by the backend and
//! the small value types used to describe modules and exported cells.

mod cell;
mod day_result;
mod module_set;
mod slice;

pub use cell::CellValue;
pub use day_result::{DAY_KEY_FORMAT, DayResult, ThreeHourSummary, find_day};
pub use module_set::{ActiveModules, ModuleKey};
pub use slice::{ModuleStatus, ThreeHourFlag, TimeSlice};
