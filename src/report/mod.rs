//! Presentation of check results.
//!
//! This module builds the per-day compliance summary and the slice table of
//! a selected day. Both are plain data; how they are drawn is up to the
//! caller.

mod detail_view;
mod table;

pub use detail_view::{
    ComplianceDetailView, ComplianceReport, DisplayMetadata, Indicator, ReportLine, ReportSection,
};
pub use table::{RenderedTable, ResultTable, TableRow};
