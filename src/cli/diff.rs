//! Diff command handler.
//!
//! Implements the `diff` subcommand for comparing two ATT&CK releases.

use crate::config::{DiffConfig, Validatable};
use crate::diff::DiffReport;
use crate::pipeline::{compute_diff, exit_codes, load_releases, output_report, PipelineError};
use anyhow::Result;

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("invalid configuration:\n  {}", messages.join("\n  "));
    }

    let releases = load_releases(&config).map_err(|source| PipelineError::LoadFailed {
        path: format!(
            "{} / {}",
            config.paths.old.display(),
            config.paths.new.display()
        ),
        source,
    })?;

    if !config.behavior.quiet {
        tracing::info!(
            "Loaded {} records from both releases",
            releases.record_count()
        );
    }

    let report = compute_diff(&config, &releases)
        .map_err(|source| PipelineError::DiffFailed { source })?;

    output_report(&config, &report).map_err(|source| PipelineError::ReportFailed { source })?;

    Ok(determine_exit_code(&config, &report))
}

/// Determine the appropriate exit code based on diff results and config flags.
const fn determine_exit_code(config: &DiffConfig, report: &DiffReport) -> i32 {
    if config.behavior.fail_on_change && report.has_changes() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiffConfigBuilder;
    use crate::diff::{ChangeEntry, DomainDiff};
    use crate::model::{AttackRecord, Domain, ObjectKind};

    fn config(fail_on_change: bool) -> DiffConfig {
        DiffConfigBuilder::new()
            .old_path("old".into())
            .new_path("new".into())
            .fail_on_change(fail_on_change)
            .build()
            .expect("config")
    }

    fn report_with_addition() -> DiffReport {
        let mut diff = DomainDiff::empty(ObjectKind::Group, Domain::Enterprise, false);
        diff.additions = vec![ChangeEntry::new(AttackRecord::new(
            "intrusion-set--1",
            "intrusion-set",
        ))];
        let mut report = DiffReport::new(false);
        report.insert(diff);
        report.calculate_summary();
        report
    }

    #[test]
    fn test_exit_code_requires_flag() {
        let report = report_with_addition();
        assert_eq!(
            determine_exit_code(&config(false), &report),
            exit_codes::SUCCESS
        );
        assert_eq!(
            determine_exit_code(&config(true), &report),
            exit_codes::CHANGES_DETECTED
        );
        assert_eq!(
            determine_exit_code(&config(true), &DiffReport::new(false)),
            exit_codes::SUCCESS
        );
    }

    #[test]
    fn test_invalid_config_is_rejected_before_loading() {
        let config = DiffConfigBuilder::new()
            .old_path("does-not-exist".into())
            .new_path("does-not-exist".into())
            .types(Vec::new())
            .build()
            .expect("config");
        let err = run_diff(config).expect_err("empty selection");
        assert!(err.to_string().contains("selection.types"));
    }
}
