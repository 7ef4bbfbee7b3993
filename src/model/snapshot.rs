//! Immutable identifier → record index for one (kind, domain) pair.

use super::{AttackRecord, Domain, ObjectKind, StixBundle};
use crate::error::{AttackDiffError, DiffErrorKind, Result};
use indexmap::IndexMap;
use indexmap::map::Entry;
use std::collections::HashSet;
use xxhash_rust::xxh3::xxh3_64;

/// One knowledge-base version of one kind in one domain.
///
/// Built once and never mutated, so it can be shared across threads without
/// synchronization.
#[derive(Debug, Clone)]
pub struct Snapshot {
    kind: ObjectKind,
    domain: Domain,
    records: IndexMap<String, AttackRecord>,
    content_hash: u64,
}

impl Snapshot {
    /// Index a raw collection of records.
    ///
    /// Fails with [`DiffErrorKind::DuplicateIdentifier`] when two records
    /// share an id.
    pub fn from_records<I>(kind: ObjectKind, domain: Domain, records: I) -> Result<Self>
    where
        I: IntoIterator<Item = AttackRecord>,
    {
        let mut map = IndexMap::new();
        for record in records {
            match map.entry(record.id.clone()) {
                Entry::Occupied(entry) => {
                    return Err(AttackDiffError::diff(
                        format!("indexing {kind} records of {domain}"),
                        DiffErrorKind::DuplicateIdentifier {
                            id: entry.key().clone(),
                        },
                    ));
                }
                Entry::Vacant(entry) => {
                    entry.insert(record);
                }
            }
        }

        let content_hash = Self::compute_content_hash(&map);
        Ok(Self {
            kind,
            domain,
            records: map,
            content_hash,
        })
    }

    /// Index the records of one kind from a bundle.
    pub fn from_bundle(bundle: &StixBundle, kind: ObjectKind, domain: Domain) -> Result<Self> {
        Self::from_records(kind, domain, bundle.records_of(kind).cloned())
    }

    /// Hash over all records in id order, lets identical snapshots skip category assignment.
    fn compute_content_hash(records: &IndexMap<String, AttackRecord>) -> u64 {
        let mut ids: Vec<&String> = records.keys().collect();
        ids.sort();

        let mut input = Vec::new();
        for id in ids {
            if let Ok(bytes) = serde_json::to_vec(&records[id]) {
                input.extend(bytes);
            }
        }
        xxh3_64(&input)
    }

    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        self.kind
    }

    #[must_use]
    pub const fn domain(&self) -> Domain {
        self.domain
    }

    #[must_use]
    pub const fn content_hash(&self) -> u64 {
        self.content_hash
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&AttackRecord> {
        self.records.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Identifier set of this snapshot.
    #[must_use]
    pub fn ids(&self) -> HashSet<&str> {
        self.records.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttackRecord> {
        self.records.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
