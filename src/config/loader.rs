//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading service
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ComplianceError, ComplianceResult};

use super::types::{AppConfig, ExportConfig, ReportConfig, ServiceConfig};

/// Loads and provides access to the service configuration.
///
/// # Directory Structure
///
/// ```text
/// config/ggd/
/// ├── service.yaml   # Bind address and log level
/// ├── report.yaml    # Report line icons
/// └── export.yaml    # PDF layout and CSV options
/// ```
///
/// # Example
///
/// ```no_run
/// use ggd_compliance::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/ggd")?;
/// println!("Binding to {}", loader.service().bind_address);
/// # Ok::<(), ggd_compliance::error::ComplianceError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any of the three files is missing or is not
    /// valid YAML for its section.
    pub fn load<P: AsRef<Path>>(path: P) -> ComplianceResult<Self> {
        let path = path.as_ref();

        let service = Self::load_yaml::<ServiceConfig>(&path.join("service.yaml"))?;
        let report = Self::load_yaml::<ReportConfig>(&path.join("report.yaml"))?;
        let export_path = path.join("export.yaml");
        let export = Self::load_yaml::<ExportConfig>(&export_path)?;

        if !export.csv.delimiter.is_ascii() {
            return Err(ComplianceError::ConfigParseError {
                path: export_path.display().to_string(),
                message: format!(
                    "csv delimiter '{}' must be a single ASCII character",
                    export.csv.delimiter
                ),
            });
        }

        debug!(path = %path.display(), "Loaded configuration");

        Ok(Self {
            config: AppConfig::new(service, report, export),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: AppConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> ComplianceResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| ComplianceError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| ComplianceError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the service settings.
    pub fn service(&self) -> &ServiceConfig {
        self.config.service()
    }

    /// Returns the report settings.
    pub fn report(&self) -> &ReportConfig {
        self.config.report()
    }

    /// Returns the export settings.
    pub fn export(&self) -> &ExportConfig {
        self.config.export()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const CONFIG_PATH: &str = "./config/ggd";

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ggd-compliance-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_shipped_config() {
        let loader = ConfigLoader::load(CONFIG_PATH).expect("Failed to load config");
        assert!(!loader.service().bind_address.is_empty());
        assert!(loader.export().pdf.page_width > loader.export().pdf.margin * 2.0);
        assert!(!loader.report().icons.fail.is_empty());
    }

    #[test]
    fn test_missing_directory() {
        let result = ConfigLoader::load("./config/does-not-exist");
        match result {
            Err(ComplianceError::ConfigNotFound { path }) => {
                assert!(path.ends_with("service.yaml"));
            }
            other => panic!("expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_yaml() {
        let dir = scratch_dir("invalid-yaml");
        fs::write(dir.join("service.yaml"), "bind_address: [unclosed").unwrap();

        let result = ConfigLoader::load(&dir);
        assert!(matches!(result, Err(ComplianceError::ConfigParseError { .. })));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_non_ascii_delimiter_is_rejected() {
        let dir = scratch_dir("bad-delimiter");
        fs::write(dir.join("service.yaml"), "bind_address: \"127.0.0.1:0\"\n").unwrap();
        fs::write(dir.join("report.yaml"), "{}\n").unwrap();
        fs::write(dir.join("export.yaml"), "csv:\n  delimiter: \"§\"\n").unwrap();

        let result = ConfigLoader::load(&dir);
        match result {
            Err(ComplianceError::ConfigParseError { message, .. }) => {
                assert!(message.contains("ASCII"));
            }
            other => panic!("expected ConfigParseError, got {:?}", other),
        }

        fs::remove_dir_all(&dir).unwrap();
    }
}
