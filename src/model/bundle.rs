//! In-memory STIX bundle for one domain of one release.

use super::{AttackRecord, ObjectKind, Relationship};
use std::collections::HashMap;

/// The tracked objects and relationships of one STIX bundle.
///
/// Records are kept in bundle order, duplicates included: identity checks
/// happen when a [`Snapshot`](super::Snapshot) is built from the bundle.
#[derive(Debug, Clone, Default)]
pub struct StixBundle {
    records: Vec<AttackRecord>,
    relationships: Vec<Relationship>,
    /// First occurrence of each record id
    by_id: HashMap<String, usize>,
    /// `revoked-by` relationships keyed by `source_ref`
    revoked_by: HashMap<String, Vec<usize>>,
    /// Number of objects skipped because their type is not tracked
    pub skipped_objects: usize,
}

impl StixBundle {
    /// Build a bundle and its lookup indexes.
    #[must_use]
    pub fn new(records: Vec<AttackRecord>, relationships: Vec<Relationship>) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            by_id.entry(record.id.clone()).or_insert(idx);
        }

        let mut revoked_by: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, rel) in relationships.iter().enumerate() {
            if rel.is_revoked_by() {
                revoked_by.entry(rel.source_ref.clone()).or_default().push(idx);
            }
        }

        Self {
            records,
            relationships,
            by_id,
            revoked_by,
            skipped_objects: 0,
        }
    }

    /// All tracked records, in bundle order.
    #[must_use]
    pub fn records(&self) -> &[AttackRecord] {
        &self.records
    }

    /// Records belonging to one kind, in bundle order.
    pub fn records_of(&self, kind: ObjectKind) -> impl Iterator<Item = &AttackRecord> {
        self.records
            .iter()
            .filter(move |r| r.kind() == Some(kind))
    }

    #[must_use]
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Look up any tracked record by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&AttackRecord> {
        self.by_id.get(id).map(|&idx| &self.records[idx])
    }

    /// Targets of the `revoked-by` relationships whose source is `source_ref`.
    #[must_use]
    pub fn revoked_by_targets(&self, source_ref: &str) -> Vec<&str> {
        self.revoked_by
            .get(source_ref)
            .map(|indices| {
                indices
                    .iter()
                    .map(|&idx| self.relationships[idx].target_ref.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.relationships.is_empty()
    }
}
