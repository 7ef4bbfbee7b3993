//! Classification engine.

use super::classify::{classify, Classification};
use super::result::{ClassificationResult, Diagnostic, DiffReport, DomainDiff};
use super::traits::{NoRelationships, RelationshipQuery};
use super::ChangeStatus;
use crate::error::{AttackDiffError, DiffErrorKind, ErrorContext, Result};
use crate::model::{Domain, ObjectKind, Release, Snapshot};
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Diff engine for comparing ATT&CK snapshots.
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    include_minor_changes: bool,
}

impl DiffEngine {
    /// Create a new diff engine with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep minor changes in assembled diffs
    #[must_use]
    pub const fn with_minor_changes(mut self, include: bool) -> Self {
        self.include_minor_changes = include;
        self
    }

    #[must_use]
    pub const fn includes_minor_changes(&self) -> bool {
        self.include_minor_changes
    }

    /// Partition the identifiers of two snapshots.
    ///
    /// Minor changes are always computed here; [`Self::diff`] drops them
    /// afterwards when they were not requested.
    pub fn classify(
        &self,
        old: &Snapshot,
        new: &Snapshot,
        relations: &dyn RelationshipQuery,
    ) -> ClassificationResult {
        let kind = new.kind();
        let domain = new.domain();
        let mut result = ClassificationResult::new(kind, domain);

        // Identical content cannot change category, but unparsable versions
        // and timestamps are still reported.
        let identical = old.content_hash() == new.content_hash() && old.content_hash() != 0;

        let old_ids = old.ids();
        let new_ids = new.ids();

        if identical {
            debug!(%kind, %domain, "snapshots identical, checking fields only");
        } else {
            for id in new_ids.difference(&old_ids) {
                result.insert(ChangeStatus::Additions, (*id).to_string());
            }
            for id in old_ids.difference(&new_ids) {
                result.insert(ChangeStatus::Deletions, (*id).to_string());
            }
        }

        for id in old_ids.intersection(&new_ids) {
            let (Some(old_record), Some(new_record)) = (old.get(id), new.get(id)) else {
                continue;
            };

            match classify(id, old_record, new_record, relations) {
                Ok(_) if identical => {}
                Ok(classification) => {
                    if let Classification::Revoked(link) = &classification {
                        if link.candidates > 1 {
                            let diagnostic =
                                Diagnostic::ambiguous_revocation(id, link.candidates, &link.target_id);
                            warn!(id = *id, %kind, %domain, "{}", diagnostic.message);
                            result.diagnostics.push(diagnostic);
                        }
                        result
                            .revoked_by
                            .insert((*id).to_string(), link.target_id.clone());
                    }
                    if let Some(status) = classification.status() {
                        debug!(id = *id, %kind, %domain, %status, "classified");
                        result.insert(status, (*id).to_string());
                    }
                }
                Err(errors) => {
                    for error in &errors {
                        let diagnostic = Diagnostic::from_classify_error(id, error);
                        warn!(
                            id = *id,
                            %kind,
                            %domain,
                            side = ?diagnostic.side,
                            diagnostic = %diagnostic.kind,
                            "skipping: {error}"
                        );
                        result.diagnostics.push(diagnostic);
                    }
                }
            }
        }

        // Diagnostics in identifier order regardless of hash-set iteration
        result.diagnostics.sort_by(|a, b| a.id.cmp(&b.id));
        result
    }

    /// Classify and materialize one (kind, domain) pair.
    pub fn diff(
        &self,
        old: &Snapshot,
        new: &Snapshot,
        relations: &dyn RelationshipQuery,
    ) -> DomainDiff {
        let result = self
            .classify(old, new, relations)
            .retain_minor_changes(self.include_minor_changes);
        result.assemble(old, new, relations, self.include_minor_changes)
    }

    /// Diff every selected (kind, domain) pair of two releases.
    ///
    /// Pairs run on the rayon pool; the report keeps selection order.
    pub fn diff_all(
        &self,
        old: &Release,
        new: &Release,
        kinds: &[ObjectKind],
        domains: &[Domain],
    ) -> Result<DiffReport> {
        if kinds.is_empty() || domains.is_empty() {
            return Err(AttackDiffError::diff(
                "selecting pairs to diff",
                DiffErrorKind::EmptySelection,
            ));
        }

        let pairs: Vec<(ObjectKind, Domain)> = kinds
            .iter()
            .flat_map(|&kind| domains.iter().map(move |&domain| (kind, domain)))
            .collect();

        let diffs: Vec<Result<DomainDiff>> = pairs
            .par_iter()
            .map(|&(kind, domain)| self.diff_pair(old, new, kind, domain))
            .collect();

        let mut report = DiffReport::new(self.include_minor_changes);
        for diff in diffs {
            report.insert(diff?);
        }
        report.calculate_summary();
        Ok(report)
    }

    fn diff_pair(
        &self,
        old: &Release,
        new: &Release,
        kind: ObjectKind,
        domain: Domain,
    ) -> Result<DomainDiff> {
        let old_snapshot = old
            .snapshot(kind, domain)
            .context("indexing old release")?;
        let new_snapshot = new
            .snapshot(kind, domain)
            .context("indexing new release")?;
        let relations = new
            .bundle(domain)
            .map(|bundle| bundle as &dyn RelationshipQuery)
            .unwrap_or(&NoRelationships);

        info!(
            %kind,
            %domain,
            old = old_snapshot.len(),
            new = new_snapshot.len(),
            "classifying"
        );
        let diff = self.diff(&old_snapshot, &new_snapshot, relations);
        debug!(%kind, %domain, changes = diff.total_changes(), "classified pair");
        Ok(diff)
    }
}
