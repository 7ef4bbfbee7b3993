//! Diff computation stage.

use super::LoadedReleases;
use crate::config::DiffConfig;
use crate::diff::{DiffEngine, DiffReport};
use anyhow::{Context, Result};

/// Classify every selected (kind, domain) pair of the two releases.
pub fn compute_diff(config: &DiffConfig, releases: &LoadedReleases) -> Result<DiffReport> {
    let quiet = config.behavior.quiet;

    if !quiet {
        tracing::info!(
            "Computing diff for {} kinds across {} domains...",
            config.types.len(),
            config.domains.len()
        );
    }

    let engine = DiffEngine::new().with_minor_changes(config.output.minor_changes);
    let report = engine
        .diff_all(&releases.old, &releases.new, &config.types, &config.domains)
        .context("Failed to compute diff")?;

    if !quiet {
        tracing::info!(
            "Diff complete: {} changes ({} added, {} changed, {} revoked, {} deprecated)",
            report.summary.total_changes,
            report.summary.additions,
            report.summary.changes,
            report.summary.revocations,
            report.summary.deprecations
        );
    }
    if report.summary.diagnostics > 0 {
        tracing::warn!(
            "{} objects were skipped; see the warnings above",
            report.summary.diagnostics
        );
    }

    Ok(report)
}
