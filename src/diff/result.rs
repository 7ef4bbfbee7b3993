//! Diff result structures.

use super::classify::ClassifyError;
use super::traits::RelationshipQuery;
use super::version::Side;
use super::ChangeStatus;
use crate::model::{AttackRecord, Domain, ObjectKind, Snapshot};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Category of a non-fatal problem found while classifying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    VersionParse,
    TimestampParse,
    MissingRevocationLink,
    AmbiguousRevocationLink,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::VersionParse => "version-parse",
            Self::TimestampParse => "timestamp-parse",
            Self::MissingRevocationLink => "missing-revocation-link",
            Self::AmbiguousRevocationLink => "ambiguous-revocation-link",
        };
        f.write_str(s)
    }
}

/// A non-fatal problem tied to one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub id: String,
    pub kind: DiagnosticKind,
    /// Snapshot the offending field came from, when it is side-specific
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn from_classify_error(id: &str, error: &ClassifyError) -> Self {
        let (kind, side) = match error {
            ClassifyError::Version { side, .. } => (DiagnosticKind::VersionParse, Some(*side)),
            ClassifyError::Timestamp { side, .. } => (DiagnosticKind::TimestampParse, Some(*side)),
            ClassifyError::MissingRevocationLink | ClassifyError::RevocationTargetMissing(_) => {
                (DiagnosticKind::MissingRevocationLink, Some(Side::New))
            }
        };
        Self {
            id: id.to_string(),
            kind,
            side,
            message: error.to_string(),
        }
    }

    #[must_use]
    pub fn ambiguous_revocation(id: &str, candidates: usize, chosen: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: DiagnosticKind::AmbiguousRevocationLink,
            side: Some(Side::New),
            message: format!("{candidates} revoked-by relationships found, using {chosen}"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]: {}", self.id, self.kind, self.message)
    }
}

/// Partition of identifiers for one (kind, domain) pair.
///
/// Every identifier of `keys(old) ∪ keys(new)` is in at most one of the six
/// sets; identifiers in none of them are unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct ClassificationResult {
    pub kind: ObjectKind,
    pub domain: Domain,
    pub additions: BTreeSet<String>,
    pub changes: BTreeSet<String>,
    pub minor_changes: BTreeSet<String>,
    pub revocations: BTreeSet<String>,
    pub deprecations: BTreeSet<String>,
    pub deletions: BTreeSet<String>,
    /// Revoked id → id of the record that superseded it
    pub revoked_by: BTreeMap<String, String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ClassificationResult {
    /// Create an empty result
    pub fn new(kind: ObjectKind, domain: Domain) -> Self {
        Self {
            kind,
            domain,
            additions: BTreeSet::new(),
            changes: BTreeSet::new(),
            minor_changes: BTreeSet::new(),
            revocations: BTreeSet::new(),
            deprecations: BTreeSet::new(),
            deletions: BTreeSet::new(),
            revoked_by: BTreeMap::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Identifiers assigned to one status.
    #[must_use]
    pub const fn ids(&self, status: ChangeStatus) -> &BTreeSet<String> {
        match status {
            ChangeStatus::Additions => &self.additions,
            ChangeStatus::Changes => &self.changes,
            ChangeStatus::MinorChanges => &self.minor_changes,
            ChangeStatus::Revocations => &self.revocations,
            ChangeStatus::Deprecations => &self.deprecations,
            ChangeStatus::Deletions => &self.deletions,
        }
    }

    pub(crate) fn insert(&mut self, status: ChangeStatus, id: String) {
        let set = match status {
            ChangeStatus::Additions => &mut self.additions,
            ChangeStatus::Changes => &mut self.changes,
            ChangeStatus::MinorChanges => &mut self.minor_changes,
            ChangeStatus::Revocations => &mut self.revocations,
            ChangeStatus::Deprecations => &mut self.deprecations,
            ChangeStatus::Deletions => &mut self.deletions,
        };
        set.insert(id);
    }

    /// Status of an identifier, `None` when unchanged or unknown.
    #[must_use]
    pub fn status_of(&self, id: &str) -> Option<ChangeStatus> {
        ChangeStatus::ALL
            .into_iter()
            .find(|status| self.ids(*status).contains(id))
    }

    /// Drop minor changes unless `keep` is set. Classification itself always
    /// computes them.
    pub fn retain_minor_changes(mut self, keep: bool) -> Self {
        if !keep {
            self.minor_changes.clear();
        }
        self
    }

    /// Number of classified identifiers across all six sets.
    #[must_use]
    pub fn total_changes(&self) -> usize {
        ChangeStatus::ALL
            .into_iter()
            .map(|status| self.ids(status).len())
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0
    }

    /// Resolve identifiers back into records.
    ///
    /// Deletions come from the old snapshot, everything else from the new
    /// one. Revocation targets are looked up through `relations`.
    pub fn assemble(
        &self,
        old: &Snapshot,
        new: &Snapshot,
        relations: &dyn RelationshipQuery,
        include_minor_changes: bool,
    ) -> DomainDiff {
        let from_new = |ids: &BTreeSet<String>| -> Vec<ChangeEntry> {
            ids.iter()
                .filter_map(|id| new.get(id))
                .map(|record| ChangeEntry::new(record.clone()))
                .collect()
        };

        let revocations = self
            .revocations
            .iter()
            .filter_map(|id| new.get(id))
            .map(|record| {
                let target = self
                    .revoked_by
                    .get(&record.id)
                    .and_then(|target| relations.resolve(target))
                    .cloned();
                ChangeEntry {
                    record: record.clone(),
                    revoked_by: target,
                }
            })
            .collect();

        let deletions: Vec<ChangeEntry> = self
            .deletions
            .iter()
            .filter_map(|id| old.get(id))
            .map(|record| ChangeEntry::new(record.clone()))
            .collect();

        DomainDiff {
            kind: self.kind,
            domain: self.domain,
            additions: from_new(&self.additions),
            changes: from_new(&self.changes),
            minor_changes: include_minor_changes.then(|| from_new(&self.minor_changes)),
            revocations,
            deprecations: from_new(&self.deprecations),
            deletions: (!deletions.is_empty()).then_some(deletions),
            diagnostics: self.diagnostics.clone(),
        }
    }
}

/// A record placed in a change section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEntry {
    pub record: AttackRecord,
    /// Superseding record, set for revocations only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revoked_by: Option<AttackRecord>,
}

impl ChangeEntry {
    #[must_use]
    pub const fn new(record: AttackRecord) -> Self {
        Self {
            record,
            revoked_by: None,
        }
    }
}

/// Materialized diff of one (kind, domain) pair, ready for rendering.
///
/// `minor_changes` is `None` when minor changes were not requested and
/// `deletions` is `None` when there were none. Consumers treat an absent
/// section and an empty one alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainDiff {
    pub kind: ObjectKind,
    pub domain: Domain,
    pub additions: Vec<ChangeEntry>,
    pub changes: Vec<ChangeEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minor_changes: Option<Vec<ChangeEntry>>,
    pub revocations: Vec<ChangeEntry>,
    pub deprecations: Vec<ChangeEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletions: Option<Vec<ChangeEntry>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl DomainDiff {
    /// Empty diff, as produced for identical snapshots.
    #[must_use]
    pub fn empty(kind: ObjectKind, domain: Domain, include_minor_changes: bool) -> Self {
        Self {
            kind,
            domain,
            additions: Vec::new(),
            changes: Vec::new(),
            minor_changes: include_minor_changes.then(Vec::new),
            revocations: Vec::new(),
            deprecations: Vec::new(),
            deletions: None,
            diagnostics: Vec::new(),
        }
    }

    /// Entries of one section, `None` when the section is absent.
    #[must_use]
    pub fn section(&self, status: ChangeStatus) -> Option<&[ChangeEntry]> {
        match status {
            ChangeStatus::Additions => Some(&self.additions),
            ChangeStatus::Changes => Some(&self.changes),
            ChangeStatus::MinorChanges => self.minor_changes.as_deref(),
            ChangeStatus::Revocations => Some(&self.revocations),
            ChangeStatus::Deprecations => Some(&self.deprecations),
            ChangeStatus::Deletions => self.deletions.as_deref(),
        }
    }

    /// Present sections in report order.
    pub fn sections(&self) -> impl Iterator<Item = (ChangeStatus, &[ChangeEntry])> {
        ChangeStatus::ALL
            .into_iter()
            .filter_map(move |status| self.section(status).map(|entries| (status, entries)))
    }

    /// Number of entries in one section, zero when absent.
    #[must_use]
    pub fn count(&self, status: ChangeStatus) -> usize {
        self.section(status).map_or(0, <[ChangeEntry]>::len)
    }

    #[must_use]
    pub fn has_deletions(&self) -> bool {
        self.count(ChangeStatus::Deletions) > 0
    }

    #[must_use]
    pub fn total_changes(&self) -> usize {
        ChangeStatus::ALL.into_iter().map(|s| self.count(s)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0
    }
}

/// Per-status totals over a whole report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub additions: usize,
    pub changes: usize,
    pub minor_changes: usize,
    pub revocations: usize,
    pub deprecations: usize,
    pub deletions: usize,
    pub total_changes: usize,
    pub diagnostics: usize,
}

impl DiffSummary {
    #[must_use]
    pub const fn count(&self, status: ChangeStatus) -> usize {
        match status {
            ChangeStatus::Additions => self.additions,
            ChangeStatus::Changes => self.changes,
            ChangeStatus::MinorChanges => self.minor_changes,
            ChangeStatus::Revocations => self.revocations,
            ChangeStatus::Deprecations => self.deprecations,
            ChangeStatus::Deletions => self.deletions,
        }
    }
}

/// Complete result of diffing two releases.
///
/// Kinds and domains keep selection order, so rendering never depends on
/// how the pairs were scheduled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use]
pub struct DiffReport {
    pub summary: DiffSummary,
    pub minor_changes_included: bool,
    pub sections: IndexMap<ObjectKind, IndexMap<Domain, DomainDiff>>,
}

impl DiffReport {
    /// Create an empty report
    pub fn new(minor_changes_included: bool) -> Self {
        Self {
            summary: DiffSummary::default(),
            minor_changes_included,
            sections: IndexMap::new(),
        }
    }

    /// Add one pair, keeping insertion order.
    pub fn insert(&mut self, diff: DomainDiff) {
        self.sections
            .entry(diff.kind)
            .or_default()
            .insert(diff.domain, diff);
    }

    #[must_use]
    pub fn get(&self, kind: ObjectKind, domain: Domain) -> Option<&DomainDiff> {
        self.sections.get(&kind).and_then(|by_domain| by_domain.get(&domain))
    }

    /// All pairs in report order.
    pub fn domain_diffs(&self) -> impl Iterator<Item = &DomainDiff> {
        self.sections.values().flat_map(IndexMap::values)
    }

    /// Kinds in report order.
    pub fn kinds(&self) -> impl Iterator<Item = ObjectKind> + '_ {
        self.sections.keys().copied()
    }

    /// Domains covered, in first-seen order.
    #[must_use]
    pub fn domains(&self) -> Vec<Domain> {
        let mut domains = Vec::new();
        for diff in self.domain_diffs() {
            if !domains.contains(&diff.domain) {
                domains.push(diff.domain);
            }
        }
        domains
    }

    /// True when any pair has deletions.
    #[must_use]
    pub fn any_deletions(&self) -> bool {
        self.domain_diffs().any(DomainDiff::has_deletions)
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.domain_diffs().flat_map(|d| d.diagnostics.iter())
    }

    /// Calculate and update summary statistics
    pub fn calculate_summary(&mut self) {
        let mut summary = DiffSummary::default();
        for diff in self.domain_diffs() {
            summary.additions += diff.count(ChangeStatus::Additions);
            summary.changes += diff.count(ChangeStatus::Changes);
            summary.minor_changes += diff.count(ChangeStatus::MinorChanges);
            summary.revocations += diff.count(ChangeStatus::Revocations);
            summary.deprecations += diff.count(ChangeStatus::Deprecations);
            summary.deletions += diff.count(ChangeStatus::Deletions);
            summary.diagnostics += diff.diagnostics.len();
        }
        summary.total_changes = ChangeStatus::ALL
            .into_iter()
            .map(|s| summary.count(s))
            .sum();
        self.summary = summary;
    }

    /// Check if there are any changes
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.summary.total_changes > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::traits::NoRelationships;

    fn snapshot(records: Vec<AttackRecord>) -> Snapshot {
        Snapshot::from_records(ObjectKind::Technique, Domain::Enterprise, records)
            .expect("snapshot")
    }

    #[test]
    fn test_status_of_and_totals() {
        let mut result = ClassificationResult::new(ObjectKind::Technique, Domain::Enterprise);
        result.insert(ChangeStatus::Additions, "a".to_string());
        result.insert(ChangeStatus::MinorChanges, "b".to_string());
        assert_eq!(result.status_of("a"), Some(ChangeStatus::Additions));
        assert_eq!(result.status_of("zzz"), None);
        assert_eq!(result.total_changes(), 2);

        let result = result.retain_minor_changes(false);
        assert_eq!(result.status_of("b"), None);
        assert_eq!(result.total_changes(), 1);
    }

    #[test]
    fn test_assemble_resolves_from_correct_side() {
        let old = snapshot(vec![
            AttackRecord::new("gone", "attack-pattern").with_name("Old only"),
            AttackRecord::new("kept", "attack-pattern").with_name("Before"),
        ]);
        let new = snapshot(vec![
            AttackRecord::new("kept", "attack-pattern").with_name("After"),
            AttackRecord::new("fresh", "attack-pattern").with_name("New only"),
        ]);
        let mut result = ClassificationResult::new(ObjectKind::Technique, Domain::Enterprise);
        result.insert(ChangeStatus::Additions, "fresh".to_string());
        result.insert(ChangeStatus::Changes, "kept".to_string());
        result.insert(ChangeStatus::Deletions, "gone".to_string());

        let diff = result.assemble(&old, &new, &NoRelationships, false);
        assert_eq!(diff.changes[0].record.display_name(), "After");
        assert_eq!(
            diff.deletions.as_ref().map(|d| d[0].record.display_name()),
            Some("Old only")
        );
        assert!(diff.minor_changes.is_none());
        assert_eq!(diff.total_changes(), 3);
    }

    #[test]
    fn test_no_deletions_means_absent_section() {
        let snap = snapshot(vec![AttackRecord::new("a", "attack-pattern")]);
        let result = ClassificationResult::new(ObjectKind::Technique, Domain::Enterprise);
        let diff = result.assemble(&snap, &snap, &NoRelationships, true);
        assert!(diff.deletions.is_none());
        assert_eq!(diff.minor_changes.as_deref().map(<[ChangeEntry]>::len), Some(0));

        let json = serde_json::to_value(&diff).expect("serialize");
        assert!(json.get("deletions").is_none());
        assert!(json.get("minor_changes").is_some());
    }

    #[test]
    fn test_report_summary_and_order() {
        let mut report = DiffReport::new(false);
        let mut mobile = DomainDiff::empty(ObjectKind::Group, Domain::Mobile, false);
        mobile
            .additions
            .push(ChangeEntry::new(AttackRecord::new("g", "intrusion-set")));
        report.insert(mobile);
        report.insert(DomainDiff::empty(ObjectKind::Group, Domain::Enterprise, false));
        report.calculate_summary();

        assert!(report.has_changes());
        assert_eq!(report.summary.additions, 1);
        assert_eq!(report.domains(), vec![Domain::Mobile, Domain::Enterprise]);
        assert!(!report.any_deletions());
    }

    #[test]
    fn test_diagnostic_from_error() {
        let diag = Diagnostic::from_classify_error("x", &ClassifyError::MissingRevocationLink);
        assert_eq!(diag.kind, DiagnosticKind::MissingRevocationLink);
        assert!(diag.to_string().starts_with("x [missing-revocation-link]"));
    }
}
