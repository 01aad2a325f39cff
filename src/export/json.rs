//! JSON export.

use crate::error::{ComplianceError, ComplianceResult};

use super::{ExportArtifact, ExportFormat, ExportSelection};

/// Writes the selection as pretty-printed JSON (two-space indent).
///
/// A single selected day is written as one object, all days as an array.
pub fn export_json(label: &str, selection: &ExportSelection<'_>) -> ComplianceResult<ExportArtifact> {
    let bytes = match selection {
        ExportSelection::Single(day) => serde_json::to_vec_pretty(day),
        ExportSelection::All(days) => serde_json::to_vec_pretty(days),
    }
    .map_err(|e| ComplianceError::serialization("json", e))?;

    Ok(ExportArtifact::new(label, ExportFormat::Json, bytes))
}
