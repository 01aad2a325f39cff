//! Staffing recommendation from VGC annotations.
//!
//! This is a best-effort heuristic over free text. The backend writes one
//! detail line per stable-faces failure in the form
//! `"VGC failed: <names> for <child>"`, with names separated by `,`, `;`
//! or `&`. Lines in any other shape are ignored.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::TimeSlice;

static VGC_FAILED_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"VGC failed:\s*(?P<names>.+?)\s+for\s").expect("VGC annotation pattern is valid")
});

/// How often one staff name appears in VGC failure annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMention {
    /// The staff name as written in the annotation.
    pub name: String,
    /// Number of annotations naming this person.
    pub count: usize,
}

/// Extracts the staff names from one annotation line.
///
/// # Examples
///
/// ```
/// use ggd_compliance::analysis::parse_vgc_failure_names;
///
/// assert_eq!(
///     parse_vgc_failure_names("VGC failed: Alice, Bob & Carol for Child X"),
///     vec!["Alice", "Bob", "Carol"]
/// );
/// assert!(parse_vgc_failure_names("BKR ratio 1:8").is_empty());
/// ```
pub fn parse_vgc_failure_names(line: &str) -> Vec<&str> {
    let Some(captures) = VGC_FAILED_REGEX.captures(line) else {
        return Vec::new();
    };
    let Some(names) = captures.name("names") else {
        return Vec::new();
    };

    names
        .as_str()
        .split([',', ';', '&'])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Tallies staff names across every slice's VGC annotations.
///
/// Names are listed in the order they were first encountered.
pub fn tally_vgc_mentions(slices: &[TimeSlice]) -> Vec<StaffMention> {
    let mut mentions: Vec<StaffMention> = Vec::new();
    for line in slices.iter().flat_map(TimeSlice::details) {
        for name in parse_vgc_failure_names(line) {
            match mentions.iter_mut().find(|mention| mention.name == name) {
                Some(mention) => mention.count += 1,
                None => mentions.push(StaffMention {
                    name: name.to_string(),
                    count: 1,
                }),
            }
        }
    }
    mentions
}

/// The staff member most often named in VGC failure annotations.
///
/// On equal counts the name encountered first wins. Returns `None` when no
/// annotation matches.
///
/// # Examples
///
/// ```
/// use ggd_compliance::analysis::recommend_staff_from_details;
/// use ggd_compliance::models::{ModuleStatus, TimeSlice};
///
/// let mut first = TimeSlice::new("09:00", "09:15", ModuleStatus::Pass);
/// first.set_details(vec!["VGC failed: Alice, Bob for Child X".to_string()]);
/// let mut second = TimeSlice::new("09:15", "09:30", ModuleStatus::Pass);
/// second.set_details(vec!["VGC failed: Alice for Child Y".to_string()]);
///
/// assert_eq!(recommend_staff_from_details(&[first, second]).as_deref(), Some("Alice"));
/// ```
pub fn recommend_staff_from_details(slices: &[TimeSlice]) -> Option<String> {
    let mut best: Option<StaffMention> = None;
    for mention in tally_vgc_mentions(slices) {
        if best.as_ref().is_none_or(|current| mention.count > current.count) {
            best = Some(mention);
        }
    }
    best.map(|mention| mention.name)
}
