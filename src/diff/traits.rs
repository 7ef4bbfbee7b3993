//! Trait definitions for the classifier's collaborators.
//!
//! The classifier never reads bundles directly. Revocation links are resolved
//! through [`RelationshipQuery`], so any store that can answer "what revoked
//! this object?" can back a diff.

use crate::model::{AttackRecord, StixBundle};

/// Relationship lookups over the *new* release.
pub trait RelationshipQuery: Send + Sync {
    /// Target ids of `revoked-by` relationships whose source is `source_ref`,
    /// in store order. At most one is expected.
    fn revoked_by_targets(&self, source_ref: &str) -> Vec<&str>;

    /// Resolve any object of the release by id.
    fn resolve(&self, id: &str) -> Option<&AttackRecord>;
}

impl RelationshipQuery for StixBundle {
    fn revoked_by_targets(&self, source_ref: &str) -> Vec<&str> {
        StixBundle::revoked_by_targets(self, source_ref)
    }

    fn resolve(&self, id: &str) -> Option<&AttackRecord> {
        self.get(id)
    }
}

/// A query that knows no relationships, for diffs without revocation data.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRelationships;

impl RelationshipQuery for NoRelationships {
    fn revoked_by_targets(&self, _source_ref: &str) -> Vec<&str> {
        Vec::new()
    }

    fn resolve(&self, _id: &str) -> Option<&AttackRecord> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Relationship;

    #[test]
    fn test_bundle_answers_revocation_queries() {
        let bundle = StixBundle::new(
            vec![AttackRecord::new("attack-pattern--new", "attack-pattern")],
            vec![Relationship::revoked_by(
                "relationship--1",
                "attack-pattern--old",
                "attack-pattern--new",
            )],
        );
        let query: &dyn RelationshipQuery = &bundle;
        assert_eq!(
            query.revoked_by_targets("attack-pattern--old"),
            vec!["attack-pattern--new"]
        );
        assert!(query.resolve("attack-pattern--new").is_some());
    }

    #[test]
    fn test_no_relationships() {
        let query = NoRelationships;
        assert!(query.revoked_by_targets("anything").is_empty());
        assert!(query.resolve("anything").is_none());
    }
}
