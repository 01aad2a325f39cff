//! Time slice model and verdict types.
//!
//! A [`TimeSlice`] is one interval of a checked day exactly as the backend
//! delivers it: a JSON object keyed by the backend's column names
//! (`"From Time"`, `"#Children"`, `"BKR"`, ...). The object is kept as-is,
//! in arrival order, and the typed accessors read from it leniently. A
//! field that is absent, `null` or of an unexpected type reads as missing
//! instead of rejecting the slice.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::analysis::time_to_minutes;

use super::{CellValue, ModuleKey};

/// Wire name of the slice start time.
pub const FROM_TIME_FIELD: &str = "From Time";
/// Wire name of the slice end time.
pub const TO_TIME_FIELD: &str = "To Time";
/// Wire name of the child count.
pub const CHILD_COUNT_FIELD: &str = "#Children";
/// Wire name of the required staff count.
pub const REQUIRED_STAFF_FIELD: &str = "RequiredStaff";
/// Wire name of the present staff count.
pub const STAFF_COUNT_FIELD: &str = "#Staff";
/// Wire name of the detail lines.
pub const DETAILS_FIELD: &str = "Details";

/// Verdict of the BKR or VGC module for one slice.
///
/// Labels other than `Pass` and `No` deserialize as `Unknown`.
///
/// # Example
///
/// ```
/// use ggd_compliance::models::ModuleStatus;
///
/// let status: ModuleStatus = serde_json::from_str("\"No\"").unwrap();
/// assert!(status.is_fail());
/// let odd: ModuleStatus = serde_json::from_str("\"Maybe\"").unwrap();
/// assert_eq!(odd, ModuleStatus::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleStatus {
    /// The slice satisfies the module.
    Pass,
    /// The slice violates the module.
    No,
    /// The module could not be evaluated for the slice.
    #[serde(other)]
    Unknown,
}

impl ModuleStatus {
    /// Returns true if this verdict is a failure.
    pub fn is_fail(self) -> bool {
        self == ModuleStatus::No
    }

    /// Returns the wire label of the verdict.
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleStatus::Pass => "Pass",
            ModuleStatus::No => "No",
            ModuleStatus::Unknown => "Unknown",
        }
    }

    /// Reads a wire label; anything unrecognised is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Pass" => ModuleStatus::Pass,
            "No" => ModuleStatus::No,
            _ => ModuleStatus::Unknown,
        }
    }
}

/// Verdict of the three-hour rule, per slice or per day.
///
/// Labels other than `Yes` and `No` deserialize as `Unknown`, which is
/// also the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThreeHourFlag {
    /// The rule is respected.
    Yes,
    /// The rule is violated.
    No,
    /// The rule could not be evaluated.
    #[default]
    #[serde(other)]
    Unknown,
}

impl ThreeHourFlag {
    /// Returns the wire label of the flag.
    pub fn as_str(self) -> &'static str {
        match self {
            ThreeHourFlag::Yes => "Yes",
            ThreeHourFlag::No => "No",
            ThreeHourFlag::Unknown => "Unknown",
        }
    }

    /// Reads a wire label; anything unrecognised is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Yes" => ThreeHourFlag::Yes,
            "No" => ThreeHourFlag::No,
            _ => ThreeHourFlag::Unknown,
        }
    }
}

impl From<ThreeHourFlag> for ModuleStatus {
    fn from(flag: ThreeHourFlag) -> Self {
        match flag {
            ThreeHourFlag::Yes => ModuleStatus::Pass,
            ThreeHourFlag::No => ModuleStatus::No,
            ThreeHourFlag::Unknown => ModuleStatus::Unknown,
        }
    }
}

/// One interval of a compliance-checked day.
///
/// Serializes back to exactly the object it was read from. Setters write
/// through to that object; a key that is already present keeps its place.
///
/// # Example
///
/// ```
/// use ggd_compliance::models::{ModuleStatus, TimeSlice};
///
/// let slice: TimeSlice = serde_json::from_str(r##"{
///     "From Time": "09:00",
///     "To Time": "09:15",
///     "#Children": 11,
///     "RequiredStaff": 2,
///     "#Staff": null,
///     "BKR": "No"
/// }"##).unwrap();
///
/// assert_eq!(slice.bkr(), Some(ModuleStatus::No));
/// assert_eq!(slice.child_count(), Some(11));
/// assert_eq!(slice.staff_count(), None);
/// assert_eq!(slice.duration_minutes(), Some(15));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSlice {
    fields: Map<String, Value>,
}

impl TimeSlice {
    /// Creates a slice with the given times and BKR verdict and no other data.
    pub fn new(from_time: impl Into<String>, to_time: impl Into<String>, bkr: ModuleStatus) -> Self {
        let (from_time, to_time): (String, String) = (from_time.into(), to_time.into());
        let mut slice = Self::default();
        slice.set(FROM_TIME_FIELD, from_time);
        slice.set(TO_TIME_FIELD, to_time);
        slice.set_status(ModuleKey::Bkr, bkr);
        slice
    }

    /// Wraps a wire object.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// The wire object, in arrival order.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The raw value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Sets `key`, appending it if it is new.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn count(&self, key: &str) -> Option<u32> {
        self.get(key)
            .and_then(Value::as_u64)
            .and_then(|count| u32::try_from(count).ok())
    }

    /// Start of the slice as delivered.
    pub fn from_time(&self) -> Option<&str> {
        self.text(FROM_TIME_FIELD)
    }

    /// End of the slice as delivered.
    pub fn to_time(&self) -> Option<&str> {
        self.text(TO_TIME_FIELD)
    }

    /// Number of children present.
    pub fn child_count(&self) -> Option<u32> {
        self.count(CHILD_COUNT_FIELD)
    }

    /// Number of staff required for the children present.
    pub fn required_staff(&self) -> Option<u32> {
        self.count(REQUIRED_STAFF_FIELD)
    }

    /// Number of staff actually present.
    pub fn staff_count(&self) -> Option<u32> {
        self.count(STAFF_COUNT_FIELD)
    }

    /// Sets the three head counts.
    pub fn set_counts(&mut self, children: u32, required_staff: u32, staff: u32) {
        self.set(CHILD_COUNT_FIELD, children);
        self.set(REQUIRED_STAFF_FIELD, required_staff);
        self.set(STAFF_COUNT_FIELD, staff);
    }

    /// Staff-to-child ratio verdict.
    pub fn bkr(&self) -> Option<ModuleStatus> {
        self.status(ModuleKey::Bkr)
    }

    /// Stable-faces verdict, absent when the module was not requested.
    pub fn vgc(&self) -> Option<ModuleStatus> {
        self.status(ModuleKey::Vgc)
    }

    /// Three-hour rule verdict, absent when the module was not requested.
    pub fn three_hours(&self) -> Option<ThreeHourFlag> {
        self.text(ModuleKey::ThreeHours.field_name())
            .map(ThreeHourFlag::from_label)
    }

    /// Sets the verdict of `module`. For the three-hour rule, `Pass` is
    /// written as `Yes`.
    pub fn set_status(&mut self, module: ModuleKey, status: ModuleStatus) {
        let label = match (module, status) {
            (ModuleKey::ThreeHours, ModuleStatus::Pass) => ThreeHourFlag::Yes.as_str(),
            _ => status.as_str(),
        };
        self.set(module.field_name(), label);
    }

    /// Sets the three-hour rule verdict.
    pub fn set_three_hours(&mut self, flag: ThreeHourFlag) {
        self.set(ModuleKey::ThreeHours.field_name(), flag.as_str());
    }

    /// Free-text annotations produced by the check.
    ///
    /// A single string counts as one line; non-string entries are skipped.
    pub fn details(&self) -> Vec<&str> {
        match self.get(DETAILS_FIELD) {
            Some(Value::Array(lines)) => lines.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(line)) => vec![line.as_str()],
            _ => Vec::new(),
        }
    }

    /// Replaces the detail lines.
    pub fn set_details(&mut self, lines: Vec<String>) {
        self.set(DETAILS_FIELD, lines);
    }

    /// Start of the slice in minutes since midnight.
    pub fn from_minutes(&self) -> Option<u32> {
        time_to_minutes(self.from_time()?)
    }

    /// End of the slice in minutes since midnight.
    pub fn to_minutes(&self) -> Option<u32> {
        time_to_minutes(self.to_time()?)
    }

    /// Length of the slice in minutes, if both times parse.
    pub fn duration_minutes(&self) -> Option<u32> {
        Some(self.to_minutes()?.saturating_sub(self.from_minutes()?))
    }

    /// The `"HH:MM-HH:MM"` label of the slice as delivered.
    pub fn time_range(&self) -> String {
        format!(
            "{}-{}",
            self.from_time().unwrap_or_default(),
            self.to_time().unwrap_or_default()
        )
    }

    /// The verdict this slice carries for `module`, if any.
    pub fn status(&self, module: ModuleKey) -> Option<ModuleStatus> {
        match module {
            ModuleKey::ThreeHours => self.three_hours().map(ModuleStatus::from),
            _ => self.text(module.field_name()).map(ModuleStatus::from_label),
        }
    }

    /// The slice as named cells, in arrival order.
    pub fn to_cells(&self) -> Vec<(String, CellValue)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.clone(), CellValue::from(value.clone())))
            .collect()
    }
}
