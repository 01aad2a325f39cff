//! Configuration loading for the compliance service.
//!
//! This module loads the service, report and export settings from a
//! directory of YAML files. Every section also has a `Default`, so the
//! library functions can be used without any configuration on disk.
//!
//! # Example
//!
//! ```no_run
//! use ggd_compliance::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/ggd").unwrap();
//! println!("Log level: {}", config.service().log_level);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AppConfig, CsvOptions, ExportConfig, PdfLayout, ReportConfig, ReportIcons, ServiceConfig,
};
