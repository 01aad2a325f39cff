//! Configuration types for the compliance service.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

/// Process settings from `service.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceConfig {
    /// Socket address the HTTP service binds to (e.g. "0.0.0.0:8080").
    pub bind_address: String,
    /// Default log filter, used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            log_level: default_log_level(),
        }
    }
}

/// Icons prefixed to report lines.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportIcons {
    /// Shown for compliant outcomes.
    pub pass: String,
    /// Shown for failures.
    pub fail: String,
    /// Shown when there is nothing to judge (no child present).
    pub neutral: String,
    /// Shown for informational notes.
    pub info: String,
}

impl Default for ReportIcons {
    fn default() -> Self {
        Self {
            pass: "✅".to_string(),
            fail: "❌".to_string(),
            neutral: "⚪".to_string(),
            info: "ℹ️".to_string(),
        }
    }
}

/// Report rendering settings from `report.yaml`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ReportConfig {
    /// Line icons.
    #[serde(default)]
    pub icons: ReportIcons,
}

/// Page geometry and type sizes for PDF exports, in points.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PdfLayout {
    /// Page width.
    pub page_width: f32,
    /// Page height.
    pub page_height: f32,
    /// Margin on every side.
    pub margin: f32,
    /// Font size of table cells.
    pub font_size: f32,
    /// Font size of the page title.
    pub title_font_size: f32,
    /// Height of one table row.
    pub row_height: f32,
}

impl Default for PdfLayout {
    // A4 landscape
    fn default() -> Self {
        Self {
            page_width: 842.0,
            page_height: 595.0,
            margin: 36.0,
            font_size: 7.0,
            title_font_size: 14.0,
            row_height: 12.0,
        }
    }
}

/// CSV export settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CsvOptions {
    /// Field delimiter; must be a single ASCII character.
    pub delimiter: char,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

/// Export settings from `export.yaml`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ExportConfig {
    /// PDF layout.
    #[serde(default)]
    pub pdf: PdfLayout,
    /// CSV options.
    #[serde(default)]
    pub csv: CsvOptions,
}

/// The complete configuration loaded from a configuration directory.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    service: ServiceConfig,
    report: ReportConfig,
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new AppConfig from its component parts.
    pub fn new(service: ServiceConfig, report: ReportConfig, export: ExportConfig) -> Self {
        Self {
            service,
            report,
            export,
        }
    }

    /// Returns the service settings.
    pub fn service(&self) -> &ServiceConfig {
        &self.service
    }

    /// Returns the report settings.
    pub fn report(&self) -> &ReportConfig {
        &self.report
    }

    /// Returns the export settings.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }
}
