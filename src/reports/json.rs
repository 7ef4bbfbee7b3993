//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{ChangeEntry, ChangeStatus, Diagnostic, DiffReport, DiffSummary, DomainDiff};
use crate::model::{Domain, ObjectKind};
use chrono::Utc;
use indexmap::IndexMap;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Whether to only include summary
    summary_only: bool,
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            summary_only: false,
            pretty: true,
        }
    }

    /// Create a summary-only reporter
    #[must_use]
    pub const fn summary_only() -> Self {
        Self {
            summary_only: true,
            pretty: true,
        }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, report: &DiffReport, config: &ReportConfig) -> Result<String, ReportError> {
        let document = JsonDiffReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: "attack-diff".to_string(),
                    version: config.metadata.tool_version.clone(),
                },
                generated_at: Utc::now().to_rfc3339(),
                old_path: config.metadata.old_path.clone(),
                new_path: config.metadata.new_path.clone(),
                minor_changes_included: report.minor_changes_included,
            },
            summary: &report.summary,
            sections: if self.summary_only {
                None
            } else {
                Some(report.domain_diffs().map(JsonSection::from_diff).collect())
            },
            diagnostics: report.diagnostics().collect(),
        };

        let output = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        };
        output.map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// JSON structures

#[derive(Serialize)]
struct JsonDiffReport<'a> {
    metadata: JsonReportMetadata,
    summary: &'a DiffSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    sections: Option<Vec<JsonSection<'a>>>,
    diagnostics: Vec<&'a Diagnostic>,
}

#[derive(Serialize)]
struct JsonReportMetadata {
    tool: ToolInfo,
    generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    old_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_path: Option<String>,
    minor_changes_included: bool,
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}

#[derive(Serialize)]
struct JsonSection<'a> {
    kind: ObjectKind,
    domain: Domain,
    counts: IndexMap<ChangeStatus, usize>,
    /// Present sections only; absent minor changes/deletions stay absent
    entries: IndexMap<ChangeStatus, Vec<JsonEntry<'a>>>,
}

impl<'a> JsonSection<'a> {
    fn from_diff(diff: &'a DomainDiff) -> Self {
        let mut counts = IndexMap::new();
        let mut entries = IndexMap::new();
        for (status, section) in diff.sections() {
            counts.insert(status, section.len());
            entries.insert(status, section.iter().map(JsonEntry::from_entry).collect());
        }
        Self {
            kind: diff.kind,
            domain: diff.domain,
            counts,
            entries,
        }
    }
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    attack_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    revoked_by: Option<JsonRevokedBy<'a>>,
}

#[derive(Serialize)]
struct JsonRevokedBy<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    attack_id: Option<&'a str>,
}

impl<'a> JsonEntry<'a> {
    fn from_entry(entry: &'a ChangeEntry) -> Self {
        Self {
            id: &entry.record.id,
            name: entry.record.display_name(),
            attack_id: entry.record.external_id(),
            revoked_by: entry.revoked_by.as_ref().map(|target| JsonRevokedBy {
                id: &target.id,
                name: target.display_name(),
                attack_id: target.external_id(),
            }),
        }
    }
}
