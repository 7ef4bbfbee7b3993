//! One ATT&CK release: a bundle per loaded domain.

use super::{Domain, ObjectKind, Snapshot, StixBundle};
use crate::error::{OptionContext, Result};
use indexmap::IndexMap;

/// Bundles of one release, keyed by domain in load order.
#[derive(Debug, Clone, Default)]
pub struct Release {
    bundles: IndexMap<Domain, StixBundle>,
}

impl Release {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the bundle of a domain.
    pub fn insert(&mut self, domain: Domain, bundle: StixBundle) {
        self.bundles.insert(domain, bundle);
    }

    #[must_use]
    pub fn with_bundle(mut self, domain: Domain, bundle: StixBundle) -> Self {
        self.insert(domain, bundle);
        self
    }

    #[must_use]
    pub fn bundle(&self, domain: Domain) -> Option<&StixBundle> {
        self.bundles.get(&domain)
    }

    pub fn domains(&self) -> impl Iterator<Item = Domain> + '_ {
        self.bundles.keys().copied()
    }

    /// Build the snapshot of one (kind, domain) pair.
    pub fn snapshot(&self, kind: ObjectKind, domain: Domain) -> Result<Snapshot> {
        let bundle = self
            .bundle(domain)
            .with_context_none(|| format!("release has no {domain} bundle"))?;
        Snapshot::from_bundle(bundle, kind, domain)
    }

    /// Total tracked records across all bundles.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.bundles.values().map(StixBundle::record_count).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AttackRecord;

    #[test]
    fn test_snapshot_of_missing_domain_fails() {
        let release = Release::new().with_bundle(
            Domain::Enterprise,
            StixBundle::new(
                vec![AttackRecord::new("attack-pattern--1", "attack-pattern")],
                Vec::new(),
            ),
        );
        assert_eq!(release.record_count(), 1);
        assert!(release
            .snapshot(ObjectKind::Technique, Domain::Enterprise)
            .is_ok());
        let err = release
            .snapshot(ObjectKind::Technique, Domain::Mobile)
            .expect_err("no mobile bundle");
        assert!(err.to_string().contains("mobile-attack"));
    }
}
