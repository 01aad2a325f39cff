//! Per-day compliance summary.
//!
//! [`ComplianceDetailView`] turns one [`DayResult`] into a structured
//! [`ComplianceReport`]: a BKR section, and VGC and three-hour sections
//! when those modules were requested. Rendering is pure; the report can be
//! rebuilt from the same input at any time.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::{
    FailSummary, count_unknown_vgc, is_empty_day, merge_fail_ranges, recommend_staff_from_details,
};
use crate::config::ReportIcons;
use crate::models::{ActiveModules, DayResult, ModuleKey, ThreeHourFlag};

/// Icon class of a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    /// Compliant.
    Pass,
    /// Not compliant.
    Fail,
    /// Nothing to judge.
    Neutral,
    /// Informational note.
    Info,
}

impl Indicator {
    fn icon(self, icons: &ReportIcons) -> &str {
        match self {
            Indicator::Pass => icons.pass.as_str(),
            Indicator::Fail => icons.fail.as_str(),
            Indicator::Neutral => icons.neutral.as_str(),
            Indicator::Info => icons.info.as_str(),
        }
    }
}

/// One line of a report section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    /// Icon class, or `None` for plain text.
    pub indicator: Option<Indicator>,
    /// The line text.
    pub text: String,
}

impl ReportLine {
    fn new(indicator: Indicator, text: impl Into<String>) -> Self {
        Self {
            indicator: Some(indicator),
            text: text.into(),
        }
    }

    fn plain(text: impl Into<String>) -> Self {
        Self {
            indicator: None,
            text: text.into(),
        }
    }
}

/// The report block of one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    /// The module this section reports on.
    pub module: ModuleKey,
    /// Section heading.
    pub title: String,
    /// Lines in display order.
    pub lines: Vec<ReportLine>,
    /// Bulleted items shown after the lines.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bullets: Vec<String>,
    /// Failure statistics behind the lines, for BKR and VGC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_summary: Option<FailSummary>,
}

impl ReportSection {
    fn new(module: ModuleKey, title: &str) -> Self {
        Self {
            module,
            title: title.to_string(),
            lines: Vec::new(),
            bullets: Vec::new(),
            fail_summary: None,
        }
    }
}

/// Optional labels shown above the report.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayMetadata {
    /// Name of the group the check ran for.
    #[serde(default)]
    pub group_name: Option<String>,
    /// Kind of group (e.g. "KDV", "BSO").
    #[serde(default)]
    pub group_type: Option<String>,
}

/// A rendered per-day compliance summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// The day key.
    pub day: String,
    /// Full weekday name, when the day key parses as a date.
    pub weekday: Option<String>,
    /// Display labels.
    pub metadata: DisplayMetadata,
    /// Whether the day was treated as having no child present.
    pub empty_day: bool,
    /// Module sections in display order.
    pub sections: Vec<ReportSection>,
}

impl ComplianceReport {
    /// Returns the section for `module`, if it was rendered.
    pub fn section(&self, module: ModuleKey) -> Option<&ReportSection> {
        self.sections.iter().find(|section| section.module == module)
    }

    /// The heading line: group labels, weekday and day.
    pub fn heading(&self) -> String {
        let mut parts = Vec::new();
        match (&self.metadata.group_name, &self.metadata.group_type) {
            (Some(name), Some(kind)) => parts.push(format!("{} ({})", name, kind)),
            (Some(name), None) => parts.push(name.clone()),
            (None, Some(kind)) => parts.push(kind.clone()),
            (None, None) => {}
        }
        match &self.weekday {
            Some(weekday) => parts.push(format!("{} {}", weekday, self.day)),
            None => parts.push(self.day.clone()),
        }
        parts.join(" - ")
    }

    /// Renders the report as plain text with icon-prefixed lines.
    pub fn to_text(&self, icons: &ReportIcons) -> String {
        let mut out = self.heading();
        out.push('\n');
        for section in &self.sections {
            out.push('\n');
            out.push_str(&section.title);
            out.push('\n');
            for line in &section.lines {
                if let Some(indicator) = line.indicator {
                    out.push_str(indicator.icon(icons));
                    out.push(' ');
                }
                out.push_str(&line.text);
                out.push('\n');
            }
            for bullet in &section.bullets {
                out.push_str("  - ");
                out.push_str(bullet);
                out.push('\n');
            }
        }
        out
    }
}

/// Builds the compliance summary of one day.
///
/// # Example
///
/// ```
/// use ggd_compliance::models::{ActiveModules, DayResult, ModuleKey, ModuleStatus, TimeSlice};
/// use ggd_compliance::report::ComplianceDetailView;
///
/// let result = DayResult::new(
///     "03-02-2025",
///     vec![
///         TimeSlice::new("09:00", "09:15", ModuleStatus::No),
///         TimeSlice::new("09:15", "09:30", ModuleStatus::Pass),
///     ],
/// );
///
/// let report = ComplianceDetailView::new(&result, ActiveModules::bkr_only()).render();
/// let bkr = report.section(ModuleKey::Bkr).unwrap();
/// assert_eq!(bkr.lines.last().unwrap().text, "BKR failed in 1 slot(s) (0.3 hour(s) total).");
/// ```
#[derive(Debug, Clone)]
pub struct ComplianceDetailView<'a> {
    result: &'a DayResult,
    modules: ActiveModules,
    metadata: DisplayMetadata,
}

impl<'a> ComplianceDetailView<'a> {
    /// Creates a view over `result` for the requested modules.
    pub fn new(result: &'a DayResult, modules: ActiveModules) -> Self {
        Self {
            result,
            modules,
            metadata: DisplayMetadata::default(),
        }
    }

    /// Attaches group labels to the view.
    pub fn with_metadata(mut self, metadata: DisplayMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Renders the report.
    pub fn render(&self) -> ComplianceReport {
        let slices = &self.result.slices;
        let empty_day = is_empty_day(slices);

        let mut sections = vec![self.bkr_section(empty_day)];
        if self.modules.contains(ModuleKey::Vgc) {
            sections.push(self.vgc_section(empty_day));
        }
        if self.modules.contains(ModuleKey::ThreeHours) {
            sections.push(self.three_hour_section(empty_day));
        }

        debug!(
            day = %self.result.day,
            slices = slices.len(),
            empty_day,
            sections = sections.len(),
            "Rendered compliance report"
        );

        ComplianceReport {
            day: self.result.day.clone(),
            weekday: self
                .result
                .date()
                .map(|date| date.format("%A").to_string()),
            metadata: self.metadata.clone(),
            empty_day,
            sections,
        }
    }

    fn bkr_section(&self, empty_day: bool) -> ReportSection {
        let mut section = ReportSection::new(ModuleKey::Bkr, "BKR");
        if empty_day {
            section
                .lines
                .push(ReportLine::new(Indicator::Neutral, NO_CHILD_PRESENT));
            return section;
        }

        let summary = merge_fail_ranges(&self.result.slices, ModuleKey::Bkr);
        if summary.is_empty() {
            section.lines.push(ReportLine::new(
                Indicator::Pass,
                "BKR compliant in all time slots.",
            ));
        } else {
            push_failures(&mut section, "BKR", &summary);
        }
        section.fail_summary = Some(summary);
        section
    }

    fn vgc_section(&self, empty_day: bool) -> ReportSection {
        let slices = &self.result.slices;
        let mut section = ReportSection::new(ModuleKey::Vgc, "VGC");

        if empty_day {
            section
                .lines
                .push(ReportLine::new(Indicator::Neutral, NO_CHILD_PRESENT));
        } else {
            let summary = merge_fail_ranges(slices, ModuleKey::Vgc);
            if summary.is_empty() {
                section.lines.push(ReportLine::new(
                    Indicator::Pass,
                    "VGC compliant in all time slots.",
                ));
            } else {
                push_failures(&mut section, "VGC", &summary);
                if let Some(name) = recommend_staff_from_details(slices) {
                    section.lines.push(ReportLine::new(
                        Indicator::Info,
                        format!(
                            "Recommendation: schedule {} more consistently on this group to improve VGC.",
                            name
                        ),
                    ));
                }
            }
            section.fail_summary = Some(summary);
        }

        let unknown = count_unknown_vgc(slices);
        if unknown > 0 {
            section
                .lines
                .push(ReportLine::new(Indicator::Info, unknown_vgc_note(unknown)));
        }
        section
    }

    fn three_hour_section(&self, empty_day: bool) -> ReportSection {
        let mut section = ReportSection::new(ModuleKey::ThreeHours, "3-UURS");
        if empty_day {
            return section;
        }
        let Some(summary) = &self.result.three_uurs_summary else {
            return section;
        };

        let (indicator, text) = match summary.verdict {
            ThreeHourFlag::Yes => (Indicator::Pass, "Three-hour rule met."),
            ThreeHourFlag::No => (Indicator::Fail, "Three-hour rule not met."),
            ThreeHourFlag::Unknown => (Indicator::Neutral, "Three-hour rule could not be evaluated."),
        };
        section.lines.push(ReportLine::new(indicator, text));

        if let Some(reason) = summary.reason.as_deref().filter(|r| !r.trim().is_empty()) {
            section.lines.push(ReportLine::plain(reason));
        }
        section.bullets = summary.deviations.clone();
        section
    }
}

const NO_CHILD_PRESENT: &str = "No child present on this day.";

fn push_failures(section: &mut ReportSection, label: &str, summary: &FailSummary) {
    for range in &summary.ranges {
        section
            .lines
            .push(ReportLine::new(Indicator::Fail, range.text.clone()));
    }
    section.lines.push(ReportLine::new(
        Indicator::Fail,
        format!(
            "{} failed in {} slot(s) ({} hour(s) total).",
            label,
            summary.failing_slot_count,
            summary.total_fail_hours()
        ),
    ));
}

fn unknown_vgc_note(count: usize) -> String {
    if count == 1 {
        "1 time slot was marked Unknown for VGC and is not counted as pass or fail.".to_string()
    } else {
        format!(
            "{} time slots were marked Unknown for VGC and are not counted as pass or fail.",
            count
        )
    }
}
