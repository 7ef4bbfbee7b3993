//! Property-based tests for the release classifier.
//!
//! Random old/new technique sets check that every identifier lands in at
//! most one category and that revocation outranks every other change.

use attack_diff::diff::{ChangeStatus, DiffEngine};
use attack_diff::model::{AttackRecord, Domain, ObjectKind, Relationship, Snapshot, StixBundle};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Attributes of one record on one side.
#[derive(Debug, Clone)]
struct Side {
    version: &'static str,
    modified: &'static str,
    revoked: bool,
    /// `None` leaves `x_mitre_deprecated` out of the record
    deprecated: Option<bool>,
}

fn side() -> impl Strategy<Value = Side> {
    (
        prop::sample::select(vec!["1.0", "1.1", "2.0"]),
        prop::sample::select(vec![
            "2019-01-01T00:00:00.000Z",
            "2020-01-01T00:00:00.000Z",
        ]),
        any::<bool>(),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(version, modified, revoked, deprecated)| Side {
            version,
            modified,
            revoked,
            deprecated,
        })
}

fn record(id: usize, side: &Side) -> AttackRecord {
    let mut record = AttackRecord::new(format!("attack-pattern--{id}"), "attack-pattern")
        .with_name(format!("Technique {id}"))
        .with_version(side.version)
        .with_modified(side.modified);
    if side.revoked {
        record = record.with_revoked(true);
    }
    if let Some(deprecated) = side.deprecated {
        record = record.with_deprecated(deprecated);
    }
    record
}

/// Build both snapshots; every revoked new record links to a replacement.
fn snapshots(
    entries: &[(Option<Side>, Option<Side>)],
) -> (Snapshot, Snapshot, StixBundle) {
    let replacement = AttackRecord::new("attack-pattern--replacement", "attack-pattern")
        .with_version("1.0")
        .with_modified("2020-01-01T00:00:00.000Z");

    let mut old = Vec::new();
    let mut new = vec![replacement];
    let mut relationships = Vec::new();
    for (i, (old_side, new_side)) in entries.iter().enumerate() {
        if let Some(side) = old_side {
            old.push(record(i, side));
        }
        if let Some(side) = new_side {
            if side.revoked {
                relationships.push(Relationship::new(
                    format!("relationship--{i}"),
                    "revoked-by",
                    format!("attack-pattern--{i}"),
                    "attack-pattern--replacement",
                ));
            }
            new.push(record(i, side));
        }
    }

    let bundle = StixBundle::new(new.clone(), relationships);
    let old = Snapshot::from_records(ObjectKind::Technique, Domain::Enterprise, old)
        .expect("unique ids");
    let new = Snapshot::from_records(ObjectKind::Technique, Domain::Enterprise, new)
        .expect("unique ids");
    (old, new, bundle)
}

fn entries() -> impl Strategy<Value = Vec<(Option<Side>, Option<Side>)>> {
    prop::collection::vec((prop::option::of(side()), prop::option::of(side())), 0..24)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn categories_are_disjoint(entries in entries()) {
        let (old, new, bundle) = snapshots(&entries);
        let result = DiffEngine::new().classify(&old, &new, &bundle);

        let mut seen = BTreeSet::new();
        for status in ChangeStatus::ALL {
            for id in result.ids(status) {
                prop_assert!(seen.insert(id.clone()), "{} in two categories", id);
            }
        }
    }

    #[test]
    fn additions_and_deletions_are_set_differences(entries in entries()) {
        let (old, new, bundle) = snapshots(&entries);
        let result = DiffEngine::new().classify(&old, &new, &bundle);

        let old_ids: BTreeSet<String> = old.iter().map(|r| r.id.clone()).collect();
        let new_ids: BTreeSet<String> = new.iter().map(|r| r.id.clone()).collect();
        let added: BTreeSet<String> = new_ids.difference(&old_ids).cloned().collect();
        let deleted: BTreeSet<String> = old_ids.difference(&new_ids).cloned().collect();

        prop_assert_eq!(result.ids(ChangeStatus::Additions), &added);
        prop_assert_eq!(result.ids(ChangeStatus::Deletions), &deleted);
    }

    #[test]
    fn newly_revoked_outranks_other_changes(entries in entries()) {
        let (old, new, bundle) = snapshots(&entries);
        let result = DiffEngine::new().classify(&old, &new, &bundle);

        for (i, (old_side, new_side)) in entries.iter().enumerate() {
            let (Some(old_side), Some(new_side)) = (old_side, new_side) else {
                continue;
            };
            let id = format!("attack-pattern--{i}");
            if new_side.revoked && !old_side.revoked {
                prop_assert_eq!(result.status_of(&id), Some(ChangeStatus::Revocations));
                prop_assert_eq!(
                    result.revoked_by.get(&id).map(String::as_str),
                    Some("attack-pattern--replacement")
                );
            } else if new_side.revoked {
                prop_assert_eq!(result.status_of(&id), None);
            } else if new_side.deprecated == Some(true) {
                // An old flag of either value counts as already deprecated
                let expected = old_side.deprecated.is_none().then_some(ChangeStatus::Deprecations);
                prop_assert_eq!(result.status_of(&id), expected);
            }
        }
    }

    #[test]
    fn version_bump_is_a_change(entries in entries()) {
        let (old, new, bundle) = snapshots(&entries);
        let result = DiffEngine::new().classify(&old, &new, &bundle);

        for (i, (old_side, new_side)) in entries.iter().enumerate() {
            let (Some(old_side), Some(new_side)) = (old_side, new_side) else {
                continue;
            };
            if new_side.revoked || new_side.deprecated == Some(true) {
                continue;
            }
            let id = format!("attack-pattern--{i}");
            let old_version: f64 = old_side.version.parse().expect("numeric");
            let new_version: f64 = new_side.version.parse().expect("numeric");
            if new_version > old_version {
                prop_assert_eq!(result.status_of(&id), Some(ChangeStatus::Changes));
            } else if new_side.modified > old_side.modified {
                prop_assert_eq!(result.status_of(&id), Some(ChangeStatus::MinorChanges));
            } else {
                prop_assert_eq!(result.status_of(&id), None);
            }
        }
    }
}
