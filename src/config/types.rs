//! Configuration types for attack-diff operations.

use super::defaults::{self, DEFAULT_NEW_DIR, DEFAULT_OLD_DIR};
use crate::model::{Domain, ObjectKind};
use crate::reports::{ReportConfig, ReportFormat, ReportMetadata};
use chrono::{Local, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// Constructed from CLI arguments, config files, or both (with CLI
/// overriding file settings).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Release directories to compare
    pub paths: PathsConfig,
    /// Object kinds and domains to report on
    pub selection: SelectionConfig,
    /// Output configuration (format, files, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the old release directory.
    pub fn old_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.paths.old = dir.into();
        self
    }

    /// Set the new release directory.
    pub fn new_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.paths.new = dir.into();
        self
    }

    /// Restrict the object kinds.
    pub fn types(mut self, types: Vec<ObjectKind>) -> Self {
        self.config.selection.types = types;
        self
    }

    /// Restrict the domains.
    pub fn domains(mut self, domains: Vec<Domain>) -> Self {
        self.config.selection.domains = domains;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Write the Markdown changelog, to `file` or the dated default.
    pub fn markdown(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.markdown = true;
        self.config.output.markdown_file = file;
        self
    }

    /// Write Navigator layers, to `files` or the dated defaults when empty.
    pub fn layers(mut self, files: Vec<PathBuf>) -> Self {
        self.config.output.layers = true;
        self.config.output.layer_files = files;
        self
    }

    /// Prefix for Markdown links.
    pub fn site_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.output.site_prefix = prefix.into();
        self
    }

    /// Report minor changes.
    pub const fn minor_changes(mut self, include: bool) -> Self {
        self.config.output.minor_changes = include;
        self
    }

    /// Prepend the change-type key to Markdown output.
    pub const fn show_key(mut self, show: bool) -> Self {
        self.config.output.show_key = show;
        self
    }

    /// Enable fail-on-change mode.
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Release directories, each holding `<domain>.json` bundles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory of the old release
    pub old: PathBuf,
    /// Directory of the new release
    pub new: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            old: PathBuf::from(DEFAULT_OLD_DIR),
            new: PathBuf::from(DEFAULT_NEW_DIR),
        }
    }
}

/// Which (kind, domain) pairs are diffed. Order is kept in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SelectionConfig {
    /// Object kinds: technique, software, group, mitigation
    pub types: Vec<ObjectKind>,
    /// Domains: enterprise-attack, mobile-attack, pre-attack
    pub domains: Vec<Domain>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            types: ObjectKind::ALL.to_vec(),
            domains: Domain::ALL.to_vec(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Report printed to stdout (or `file`)
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
    /// Write the Markdown changelog
    pub markdown: bool,
    /// Markdown changelog path; defaults to `output/updates-<month>-<year>.md`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown_file: Option<PathBuf>,
    /// Write Navigator layers
    pub layers: bool,
    /// One layer path per selected domain; defaults to
    /// `output/<Month>_<Year>_Updates_<Domain>.json`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub layer_files: Vec<PathBuf>,
    /// Prefix for Markdown links, e.g. `https://attack.mitre.org`
    pub site_prefix: String,
    /// Report changes that did not bump the version
    pub minor_changes: bool,
    /// Prepend a key explaining the change types to the Markdown
    pub show_key: bool,
}

impl OutputConfig {
    /// Whether a Markdown file is requested.
    #[must_use]
    pub const fn wants_markdown(&self) -> bool {
        self.markdown || self.markdown_file.is_some()
    }

    /// Whether layer files are requested.
    #[must_use]
    pub fn wants_layers(&self) -> bool {
        self.layers || !self.layer_files.is_empty()
    }
}

/// Behavior flags for diff operations
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if any changes detected
    pub fail_on_change: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}

// ============================================================================
// Command-specific Configuration Types
// ============================================================================

/// Paths for diff operation
#[derive(Debug, Clone)]
pub struct DiffPaths {
    /// Old release directory
    pub old: PathBuf,
    /// New release directory
    pub new: PathBuf,
}

/// Resolved configuration of one `diff` run.
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Directories to compare
    pub paths: DiffPaths,
    /// Kinds in report order
    pub types: Vec<ObjectKind>,
    /// Domains in report order
    pub domains: Vec<Domain>,
    /// Output configuration
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
    /// Date naming default output files and layers
    pub release_date: NaiveDate,
}

impl DiffConfig {
    /// Markdown file to write, if requested.
    #[must_use]
    pub fn markdown_path(&self) -> Option<PathBuf> {
        if !self.output.wants_markdown() {
            return None;
        }
        Some(
            self.output
                .markdown_file
                .clone()
                .unwrap_or_else(|| defaults::default_markdown_path(self.release_date)),
        )
    }

    /// Layer files to write, one per domain in selection order, if requested.
    #[must_use]
    pub fn layer_paths(&self) -> Option<Vec<PathBuf>> {
        if !self.output.wants_layers() {
            return None;
        }
        if self.output.layer_files.is_empty() {
            Some(defaults::default_layer_paths(&self.domains, self.release_date))
        } else {
            Some(self.output.layer_files.clone())
        }
    }

    /// Renderer settings for this run.
    #[must_use]
    pub fn report_config(&self) -> ReportConfig {
        let mut metadata = ReportMetadata::new();
        metadata.old_path = Some(self.paths.old.display().to_string());
        metadata.new_path = Some(self.paths.new.display().to_string());
        ReportConfig {
            site_prefix: self.output.site_prefix.clone(),
            show_key: self.output.show_key,
            release_date: self.release_date,
            metadata,
        }
    }
}

/// Builder for [`DiffConfig`].
#[derive(Debug, Default)]
pub struct DiffConfigBuilder {
    old: Option<PathBuf>,
    new: Option<PathBuf>,
    selection: SelectionConfig,
    output: OutputConfig,
    behavior: BehaviorConfig,
    release_date: Option<NaiveDate>,
}

impl DiffConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a (merged) application config.
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            old: Some(config.paths.old.clone()),
            new: Some(config.paths.new.clone()),
            selection: config.selection.clone(),
            output: config.output.clone(),
            behavior: config.behavior.clone(),
            release_date: None,
        }
    }

    #[must_use]
    pub fn old_path(mut self, path: PathBuf) -> Self {
        self.old = Some(path);
        self
    }

    #[must_use]
    pub fn new_path(mut self, path: PathBuf) -> Self {
        self.new = Some(path);
        self
    }

    #[must_use]
    pub fn types(mut self, types: Vec<ObjectKind>) -> Self {
        self.selection.types = types;
        self
    }

    #[must_use]
    pub fn domains(mut self, domains: Vec<Domain>) -> Self {
        self.selection.domains = domains;
        self
    }

    #[must_use]
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.output.format = format;
        self
    }

    #[must_use]
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.output.file = file;
        self
    }

    #[must_use]
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.output.no_color = no_color;
        self
    }

    #[must_use]
    pub fn markdown(mut self, file: Option<PathBuf>) -> Self {
        self.output.markdown = true;
        self.output.markdown_file = file;
        self
    }

    #[must_use]
    pub fn layers(mut self, files: Vec<PathBuf>) -> Self {
        self.output.layers = true;
        self.output.layer_files = files;
        self
    }

    #[must_use]
    pub fn site_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output.site_prefix = prefix.into();
        self
    }

    #[must_use]
    pub const fn minor_changes(mut self, include: bool) -> Self {
        self.output.minor_changes = include;
        self
    }

    #[must_use]
    pub const fn show_key(mut self, show: bool) -> Self {
        self.output.show_key = show;
        self
    }

    #[must_use]
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.behavior.fail_on_change = fail;
        self
    }

    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.behavior.quiet = quiet;
        self
    }

    /// Fix the date used for default file names and layer titles.
    #[must_use]
    pub const fn release_date(mut self, date: NaiveDate) -> Self {
        self.release_date = Some(date);
        self
    }

    pub fn build(self) -> anyhow::Result<DiffConfig> {
        let old = self.old.ok_or_else(|| anyhow::anyhow!("old path is required"))?;
        let new = self.new.ok_or_else(|| anyhow::anyhow!("new path is required"))?;

        Ok(DiffConfig {
            paths: DiffPaths { old, new },
            types: self.selection.types,
            domains: self.selection.domains,
            output: self.output,
            behavior: self.behavior,
            release_date: self
                .release_date
                .unwrap_or_else(|| Local::now().date_naive()),
        })
    }
}
