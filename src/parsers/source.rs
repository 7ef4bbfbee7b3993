//! Where release bundles come from.

use super::parse_bundle_file;
use crate::error::{ErrorContext, Result};
use crate::model::{Domain, Release, StixBundle};
use std::path::{Path, PathBuf};
use tracing::info;

/// A provider of one STIX bundle per domain.
pub trait BundleSource: Send + Sync {
    /// Human-readable location, used in logs and error context.
    fn describe(&self) -> String;

    /// Load the bundle of one domain.
    fn load(&self, domain: Domain) -> Result<StixBundle>;
}

/// Bundles stored as `<root>/<domain>.json`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the bundle file of one domain.
    #[must_use]
    pub fn bundle_path(&self, domain: Domain) -> PathBuf {
        self.root.join(domain.bundle_file_name())
    }
}

impl BundleSource for DirectorySource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn load(&self, domain: Domain) -> Result<StixBundle> {
        parse_bundle_file(&self.bundle_path(domain))
    }
}

/// Load the selected domains of one release.
pub fn load_release(source: &dyn BundleSource, domains: &[Domain]) -> Result<Release> {
    let mut release = Release::new();
    for &domain in domains {
        let bundle = source
            .load(domain)
            .with_context(|| format!("{}: {domain}", source.describe()))?;
        info!(
            source = %source.describe(),
            %domain,
            records = bundle.record_count(),
            relationships = bundle.relationships().len(),
            skipped = bundle.skipped_objects,
            "loaded bundle"
        );
        release.insert(domain, bundle);
    }
    Ok(release)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_directory_source_reads_domain_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("mobile-attack.json"),
            r#"{"type": "bundle", "objects": [{"type": "tool", "id": "tool--1"}]}"#,
        )
        .expect("write bundle");

        let source = DirectorySource::new(dir.path());
        let release = load_release(&source, &[Domain::Mobile]).expect("load");
        assert_eq!(release.record_count(), 1);
        assert!(release.bundle(Domain::Mobile).is_some());
    }

    #[test]
    fn test_missing_domain_file_names_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = DirectorySource::new(dir.path());
        let err = load_release(&source, &[Domain::Pre]).expect_err("no file");
        assert!(err.to_string().contains("pre-attack.json"), "{err}");
    }
}
