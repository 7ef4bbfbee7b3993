//! Report generation for diff results.
//!
//! This module provides the output formats for ATT&CK diff results:
//! - Markdown: the release changelog, one section per kind and domain
//! - Navigator layers: per-domain heat maps of changed techniques
//! - JSON: Structured data for programmatic integration
//! - Summary: Compact shell-friendly output
//!
//! Layers are not a [`ReportGenerator`]: they produce one document per
//! domain and are written by the pipeline to their own files.

mod json;
mod layers;
mod markdown;
mod summary;
mod types;

pub use json::JsonReporter;
pub use layers::{
    LayerFilters, LayerReporter, LayerTechnique, LegendItem, NavigatorLayer, LAYER_VERSION,
};
pub use markdown::MarkdownReporter;
pub use summary::SummaryReporter;
pub use types::{ReportConfig, ReportFormat, ReportMetadata};

use crate::diff::DiffReport;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Layer output needs one file per selected domain: expected {expected}, got {actual}")]
    LayerFileCount { expected: usize, actual: usize },

    #[error("No reporter for format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report from diff results
    fn generate(&self, report: &DiffReport, config: &ReportConfig) -> Result<String, ReportError>;

    /// Write report to a writer
    fn write_report(
        &self,
        report: &DiffReport,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let content = self.generate(report, config)?;
        writer.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
pub fn create_reporter(format: ReportFormat) -> Result<Box<dyn ReportGenerator>, ReportError> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Result<Box<dyn ReportGenerator>, ReportError> {
    match format {
        ReportFormat::Summary => {
            if use_color {
                Ok(Box::new(SummaryReporter::new()))
            } else {
                Ok(Box::new(SummaryReporter::new().no_color()))
            }
        }
        ReportFormat::Json => Ok(Box::new(JsonReporter::new())),
        ReportFormat::Markdown => Ok(Box::new(MarkdownReporter::new())),
        ReportFormat::None => Err(ReportError::UnsupportedFormat(format.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_reporter_formats() {
        for format in [ReportFormat::Summary, ReportFormat::Json, ReportFormat::Markdown] {
            let reporter = create_reporter(format).expect("reporter");
            assert_eq!(reporter.format(), format);
        }
        assert!(matches!(
            create_reporter(ReportFormat::None),
            Err(ReportError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_write_report_to_buffer() {
        let mut report = DiffReport::new(false);
        report.calculate_summary();
        let mut buf = Vec::new();
        create_reporter_with_options(ReportFormat::Summary, false)
            .expect("reporter")
            .write_report(&report, &ReportConfig::default(), &mut buf)
            .expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.starts_with("ATT&CK Diff Summary"));
    }
}
