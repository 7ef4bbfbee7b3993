//! Markdown changelog generator.
//!
//! Layout, per selected kind and domain:
//!
//! ```text
//! ### Techniques
//!
//! **Enterprise**
//!
//! New Techniques:
//!
//! * [Phishing](/techniques/T1566)
//!
//! Technique changes:
//! No changes
//! ```

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{ChangeEntry, ChangeStatus, DiffReport, DomainDiff};
use std::fmt::Write;

/// Markdown report generator
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Key explaining each change type.
    ///
    /// Minor changes are listed only when the report includes them, and
    /// deletions only when some pair actually has deletions.
    pub fn key(&self, report: &DiffReport) -> Result<String, ReportError> {
        let mut key = String::from("#### Key\n\n");
        let mut lines = vec![ChangeStatus::Additions, ChangeStatus::Changes];
        if report.minor_changes_included {
            lines.push(ChangeStatus::MinorChanges);
        }
        lines.extend([ChangeStatus::Revocations, ChangeStatus::Deprecations]);
        if report.any_deletions() {
            lines.push(ChangeStatus::Deletions);
        }

        for (i, status) in lines.iter().enumerate() {
            if i > 0 {
                key.push('\n');
            }
            write!(key, "* {}: {}", status.key_label(), status.description())?;
        }
        Ok(key)
    }

    fn render_domain(
        &self,
        out: &mut String,
        diff: &DomainDiff,
        config: &ReportConfig,
    ) -> Result<(), ReportError> {
        write!(out, "**{}**\n\n", diff.domain.label())?;
        for (status, entries) in diff.sections() {
            let header = status.section_header(diff.kind);
            if entries.is_empty() {
                write!(out, "{header}:\nNo changes\n\n")?;
                continue;
            }
            let mut items: Vec<String> = entries
                .iter()
                .map(|entry| render_item(status, entry, &config.site_prefix))
                .collect();
            items.sort();
            write!(out, "{header}:\n\n{}\n\n", items.join("\n"))?;
        }
        Ok(())
    }
}

/// One bullet line of a section.
fn render_item(status: ChangeStatus, entry: &ChangeEntry, prefix: &str) -> String {
    let name = entry.record.display_name();
    match status {
        ChangeStatus::Deletions => format!("* {name}"),
        ChangeStatus::Revocations => match &entry.revoked_by {
            Some(target) => format!(
                "* {name} (revoked by {})",
                link(target.display_name(), target.url_path(), prefix)
            ),
            None => format!("* {name}"),
        },
        _ => format!("* {}", link(name, entry.record.url_path(), prefix)),
    }
}

/// `[name](prefix/path)`, or the bare name when the record has no URL.
fn link(name: &str, path: Option<String>, prefix: &str) -> String {
    match path {
        Some(path) => format!("[{name}]({prefix}/{path})"),
        None => name.to_string(),
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, report: &DiffReport, config: &ReportConfig) -> Result<String, ReportError> {
        let mut content = String::new();
        for (kind, by_domain) in &report.sections {
            write!(content, "### {}\n\n", kind.plural_title())?;
            for diff in by_domain.values() {
                self.render_domain(&mut content, diff, config)?;
            }
        }

        if config.show_key {
            let key = self.key(report)?;
            content = format!("{key}\n\n{content}");
        }
        Ok(content)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}
