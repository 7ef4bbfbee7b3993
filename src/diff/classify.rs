//! Per-identity decision procedure.
//!
//! Given the old and new record of one identifier, decide which change
//! category (if any) it belongs to. Branches are evaluated in order and the
//! first match wins:
//!
//! 1. revoked in new, not revoked in old → revocation
//! 2. deprecated in new, no deprecated flag in old → deprecation
//! 3. otherwise (neither revoked nor deprecated in new): version bump →
//!    change; same version with a later `modified` → minor change
//!
//! A record revoked or deprecated in new but already so in old matches its
//! branch and stays unchanged; it never falls through to the version checks.

use super::traits::RelationshipQuery;
use super::version::{
    parse_timestamp, parse_version, Side, TimestampParseError, VersionParseError,
};
use super::ChangeStatus;
use crate::model::AttackRecord;
use thiserror::Error;

/// Resolved `revoked-by` link of a newly revoked record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevocationLink {
    /// Id of the superseding record
    pub target_id: String,
    /// Number of `revoked-by` relationships found; anything above one is suspicious
    pub candidates: usize,
}

/// Outcome of classifying one identifier present in both snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Revoked(RevocationLink),
    Deprecated,
    Changed,
    MinorChanged,
    Unchanged,
}

impl Classification {
    /// Change category, `None` for unchanged.
    #[must_use]
    pub const fn status(&self) -> Option<ChangeStatus> {
        match self {
            Self::Revoked(_) => Some(ChangeStatus::Revocations),
            Self::Deprecated => Some(ChangeStatus::Deprecations),
            Self::Changed => Some(ChangeStatus::Changes),
            Self::MinorChanged => Some(ChangeStatus::MinorChanges),
            Self::Unchanged => None,
        }
    }
}

/// Reasons an identifier could not be classified. None of these abort a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("{side} record: {source}")]
    Version {
        side: Side,
        #[source]
        source: VersionParseError,
    },

    #[error("{side} record: {source}")]
    Timestamp {
        side: Side,
        #[source]
        source: TimestampParseError,
    },

    #[error("revoked in the new release but no revoked-by relationship names it as source")]
    MissingRevocationLink,

    #[error("revoked-by target {0} is not an object of the new release")]
    RevocationTargetMissing(String),
}

/// Classify one identifier.
///
/// Pure: reads the two records and the relationship store, returns either a
/// classification or every problem that prevented one.
pub fn classify(
    id: &str,
    old: &AttackRecord,
    new: &AttackRecord,
    relations: &dyn RelationshipQuery,
) -> Result<Classification, Vec<ClassifyError>> {
    if new.is_revoked() {
        if old.is_revoked() {
            return Ok(Classification::Unchanged);
        }
        return resolve_revocation(id, relations).map(Classification::Revoked);
    }

    if new.is_deprecated() {
        // Only the flag's presence on the old side is checked.
        if old.has_deprecated_flag() {
            return Ok(Classification::Unchanged);
        }
        return Ok(Classification::Deprecated);
    }

    compare_versions(old, new)
}

fn resolve_revocation(
    id: &str,
    relations: &dyn RelationshipQuery,
) -> Result<RevocationLink, Vec<ClassifyError>> {
    let targets = relations.revoked_by_targets(id);
    let Some(&target) = targets.first() else {
        return Err(vec![ClassifyError::MissingRevocationLink]);
    };
    if relations.resolve(target).is_none() {
        return Err(vec![ClassifyError::RevocationTargetMissing(
            target.to_string(),
        )]);
    }
    Ok(RevocationLink {
        target_id: target.to_string(),
        candidates: targets.len(),
    })
}

fn compare_versions(
    old: &AttackRecord,
    new: &AttackRecord,
) -> Result<Classification, Vec<ClassifyError>> {
    let old_version = parse_version(old.version.as_ref());
    let new_version = parse_version(new.version.as_ref());

    let (old_version, new_version) = match (old_version, new_version) {
        (Ok(o), Ok(n)) => (o, n),
        (o, n) => {
            let errors = [(Side::Old, o.err()), (Side::New, n.err())]
                .into_iter()
                .filter_map(|(side, err)| {
                    err.map(|source| ClassifyError::Version { side, source })
                })
                .collect();
            return Err(errors);
        }
    };

    if new_version > old_version {
        return Ok(Classification::Changed);
    }

    let old_modified = parse_timestamp(old.modified.as_deref());
    let new_modified = parse_timestamp(new.modified.as_deref());
    match (old_modified, new_modified) {
        (Ok(o), Ok(n)) if n > o => Ok(Classification::MinorChanged),
        (Ok(_), Ok(_)) => Ok(Classification::Unchanged),
        (o, n) => Err([(Side::Old, o.err()), (Side::New, n.err())]
            .into_iter()
            .filter_map(|(side, err)| err.map(|source| ClassifyError::Timestamp { side, source }))
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::traits::NoRelationships;
    use crate::model::{Relationship, StixBundle};

    fn record(version: &str, modified: &str) -> AttackRecord {
        AttackRecord::new("attack-pattern--1", "attack-pattern")
            .with_version(version)
            .with_modified(modified)
    }

    #[test]
    fn test_version_bump_is_change_regardless_of_dates() {
        let old = record("1.0", "2021-01-01");
        let new = record("2.0", "2020-01-01");
        assert_eq!(
            classify("attack-pattern--1", &old, &new, &NoRelationships),
            Ok(Classification::Changed)
        );
    }

    #[test]
    fn test_same_version_newer_date_is_minor() {
        let old = record("1.0", "2020-01-01");
        let new = record("1.0", "2020-06-01");
        assert_eq!(
            classify("attack-pattern--1", &old, &new, &NoRelationships),
            Ok(Classification::MinorChanged)
        );
    }

    #[test]
    fn test_lower_new_version_falls_back_to_dates() {
        let old = record("2.0", "2020-01-01");
        let new = record("1.0", "2020-01-01");
        assert_eq!(
            classify("attack-pattern--1", &old, &new, &NoRelationships),
            Ok(Classification::Unchanged)
        );
    }

    #[test]
    fn test_revocation_beats_version_bump() {
        let bundle = StixBundle::new(
            vec![AttackRecord::new("attack-pattern--2", "attack-pattern")],
            vec![Relationship::revoked_by(
                "relationship--1",
                "attack-pattern--1",
                "attack-pattern--2",
            )],
        );
        let old = record("1.0", "2020-01-01");
        let new = record("2.0", "2020-06-01").with_revoked(true);
        assert_eq!(
            classify("attack-pattern--1", &old, &new, &bundle),
            Ok(Classification::Revoked(RevocationLink {
                target_id: "attack-pattern--2".to_string(),
                candidates: 1,
            }))
        );
    }

    #[test]
    fn test_already_revoked_is_unchanged() {
        let old = record("1.0", "2020-01-01").with_revoked(true);
        let new = record("2.0", "2020-06-01").with_revoked(true);
        assert_eq!(
            classify("attack-pattern--1", &old, &new, &NoRelationships),
            Ok(Classification::Unchanged)
        );
    }

    #[test]
    fn test_revoked_false_in_old_counts_as_newly_revoked() {
        let bundle = StixBundle::new(
            vec![AttackRecord::new("attack-pattern--2", "attack-pattern")],
            vec![Relationship::revoked_by(
                "relationship--1",
                "attack-pattern--1",
                "attack-pattern--2",
            )],
        );
        let old = record("1.0", "2020-01-01").with_revoked(false);
        let new = record("1.0", "2020-01-01").with_revoked(true);
        let result = classify("attack-pattern--1", &old, &new, &bundle);
        assert!(matches!(result, Ok(Classification::Revoked(_))));
    }

    #[test]
    fn test_missing_revocation_link() {
        let old = record("1.0", "2020-01-01");
        let new = record("1.0", "2020-01-01").with_revoked(true);
        assert_eq!(
            classify("attack-pattern--1", &old, &new, &NoRelationships),
            Err(vec![ClassifyError::MissingRevocationLink])
        );
    }

    #[test]
    fn test_revocation_target_must_exist() {
        let bundle = StixBundle::new(
            Vec::new(),
            vec![Relationship::revoked_by(
                "relationship--1",
                "attack-pattern--1",
                "attack-pattern--9",
            )],
        );
        let old = record("1.0", "2020-01-01");
        let new = record("1.0", "2020-01-01").with_revoked(true);
        assert_eq!(
            classify("attack-pattern--1", &old, &new, &bundle),
            Err(vec![ClassifyError::RevocationTargetMissing(
                "attack-pattern--9".to_string()
            )])
        );
    }

    #[test]
    fn test_deprecation_checks_flag_presence_in_old() {
        let new = record("1.0", "2020-06-01").with_deprecated(true);

        let absent = record("1.0", "2020-01-01");
        assert_eq!(
            classify("attack-pattern--1", &absent, &new, &NoRelationships),
            Ok(Classification::Deprecated)
        );

        let explicit_false = record("1.0", "2020-01-01").with_deprecated(false);
        assert_eq!(
            classify("attack-pattern--1", &explicit_false, &new, &NoRelationships),
            Ok(Classification::Unchanged)
        );

        let already = record("1.0", "2020-01-01").with_deprecated(true);
        assert_eq!(
            classify("attack-pattern--1", &already, &new, &NoRelationships),
            Ok(Classification::Unchanged)
        );
    }

    #[test]
    fn test_deprecated_false_in_new_goes_to_version_check() {
        let old = record("1.0", "2020-01-01");
        let new = record("1.1", "2020-01-01").with_deprecated(false);
        assert_eq!(
            classify("attack-pattern--1", &old, &new, &NoRelationships),
            Ok(Classification::Changed)
        );
    }

    #[test]
    fn test_version_errors_name_each_side() {
        let old = AttackRecord::new("attack-pattern--1", "attack-pattern");
        let new = AttackRecord::new("attack-pattern--1", "attack-pattern").with_version("n/a");
        let errors = classify("attack-pattern--1", &old, &new, &NoRelationships)
            .expect_err("both versions are unusable");
        assert_eq!(
            errors,
            vec![
                ClassifyError::Version {
                    side: Side::Old,
                    source: VersionParseError::Missing,
                },
                ClassifyError::Version {
                    side: Side::New,
                    source: VersionParseError::Invalid("n/a".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_missing_timestamp_is_reported() {
        let old = AttackRecord::new("attack-pattern--1", "attack-pattern").with_version("1.0");
        let new = record("1.0", "2020-01-01");
        let errors = classify("attack-pattern--1", &old, &new, &NoRelationships)
            .expect_err("old timestamp missing");
        assert_eq!(
            errors,
            vec![ClassifyError::Timestamp {
                side: Side::Old,
                source: TimestampParseError::Missing,
            }]
        );
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(Classification::Unchanged.status(), None);
        assert_eq!(
            Classification::MinorChanged.status(),
            Some(ChangeStatus::MinorChanges)
        );
    }
}
