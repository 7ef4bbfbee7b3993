//! Release loading stage.
//!
//! Reads the selected domain bundles of both releases from their directories.

use crate::config::DiffConfig;
use crate::model::{Domain, Release};
use crate::parsers::{load_release, DirectorySource};
use anyhow::{Context, Result};
use std::path::Path;

/// The two releases of one diff run
#[derive(Debug)]
pub struct LoadedReleases {
    pub old: Release,
    pub new: Release,
}

impl LoadedReleases {
    /// Total tracked records across both releases
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.old.record_count() + self.new.record_count()
    }
}

/// Load one release directory with context for error messages
pub fn load_release_dir(dir: &Path, domains: &[Domain], quiet: bool) -> Result<Release> {
    if !quiet {
        tracing::info!("Loading release: {}", dir.display());
    }

    let release = load_release(&DirectorySource::new(dir), domains)
        .with_context(|| format!("Failed to load release: {}", dir.display()))?;

    if !quiet {
        tracing::info!("Loaded {} records", release.record_count());
    }
    Ok(release)
}

/// Load the old and new releases concurrently.
pub fn load_releases(config: &DiffConfig) -> Result<LoadedReleases> {
    let quiet = config.behavior.quiet;
    let (old, new) = rayon::join(
        || load_release_dir(&config.paths.old, &config.domains, quiet),
        || load_release_dir(&config.paths.new, &config.domains, quiet),
    );
    Ok(LoadedReleases {
        old: old?,
        new: new?,
    })
}
