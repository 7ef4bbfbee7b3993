//! Report type definitions.

use chrono::{Local, NaiveDate};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for the report written to stdout or `--output-file`
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Brief per-kind, per-domain counts
    #[default]
    Summary,
    /// Structured JSON output
    Json,
    /// Human-readable Markdown changelog
    Markdown,
    /// No report; only files requested with --markdown/--layers are written
    None,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summary => write!(f, "summary"),
            Self::Json => write!(f, "json"),
            Self::Markdown => write!(f, "markdown"),
            Self::None => write!(f, "none"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Prefix for links in Markdown output, e.g. `https://attack.mitre.org`
    pub site_prefix: String,
    /// Prepend a key explaining the change types to Markdown output
    pub show_key: bool,
    /// Release date used in layer names and descriptions
    pub release_date: NaiveDate,
    /// Additional metadata to include
    pub metadata: ReportMetadata,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            site_prefix: String::new(),
            show_key: false,
            release_date: Local::now().date_naive(),
            metadata: ReportMetadata::new(),
        }
    }
}

impl ReportConfig {
    #[must_use]
    pub fn with_site_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.site_prefix = prefix.into();
        self
    }

    #[must_use]
    pub const fn with_key(mut self, show_key: bool) -> Self {
        self.show_key = show_key;
        self
    }

    #[must_use]
    pub const fn with_release_date(mut self, date: NaiveDate) -> Self {
        self.release_date = date;
        self
    }

    /// `October 2026`, as used in layer names.
    #[must_use]
    pub fn release_label(&self) -> String {
        self.release_date.format("%B %Y").to_string()
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Old release directory
    pub old_path: Option<String>,
    /// New release directory
    pub new_path: Option<String>,
    /// Tool version
    pub tool_version: String,
}

impl ReportMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        }
    }
}
