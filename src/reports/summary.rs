//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{ChangeStatus, DiffReport, DomainDiff};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "magenta" => format!("\x1b[35m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Sign and terminal color of a status count.
const fn status_style(status: ChangeStatus) -> (&'static str, &'static str) {
    match status {
        ChangeStatus::Additions => ("+", "green"),
        ChangeStatus::Changes => ("~", "yellow"),
        ChangeStatus::MinorChanges => ("·", "dim"),
        ChangeStatus::Revocations => ("⟳", "magenta"),
        ChangeStatus::Deprecations => ("!", "red"),
        ChangeStatus::Deletions => ("-", "red"),
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn domain_line(&self, diff: &DomainDiff) -> String {
        let counts: Vec<String> = diff
            .sections()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(status, entries)| {
                let (sign, color) = status_style(status);
                format!(
                    "{} {}",
                    self.color(&format!("{sign}{}", entries.len()), color),
                    status.key().replace('_', " ")
                )
            })
            .collect();

        let body = if counts.is_empty() {
            self.color("No changes", "dim")
        } else {
            counts.join(", ")
        };
        format!("    {:<12} {body}", diff.domain.label())
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(&self, report: &DiffReport, config: &ReportConfig) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        // Header
        lines.push(self.color("ATT&CK Diff Summary", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        if let (Some(old), Some(new)) = (&config.metadata.old_path, &config.metadata.new_path) {
            lines.push(format!("{}  {old} → {new}", self.color("Releases:", "cyan")));
            lines.push(String::new());
        }

        // Changes
        for (kind, by_domain) in &report.sections {
            lines.push(self.color(&format!("{}:", kind.plural_title()), "bold"));
            for diff in by_domain.values() {
                lines.push(self.domain_line(diff));
            }
        }

        lines.push(String::new());
        let total = report.summary.total_changes;
        lines.push(format!(
            "{}  {total} {}",
            self.color("Total:", "cyan"),
            if total == 1 { "change" } else { "changes" }
        ));

        let diagnostics = report.summary.diagnostics;
        if diagnostics > 0 {
            lines.push(format!(
                "{}  {} skipped (see log)",
                self.color("Diagnostics:", "yellow"),
                diagnostics
            ));
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}
