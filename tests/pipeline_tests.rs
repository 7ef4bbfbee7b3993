//! Pipeline and CLI integration tests.
//!
//! These tests exercise the full load → diff → report pipeline, error
//! handling paths, and CLI command handlers with the fixture releases.

use attack_diff::cli::run_diff;
use attack_diff::config::{AppConfig, DiffConfig, DiffConfigBuilder};
use attack_diff::model::{Domain, ObjectKind};
use attack_diff::pipeline::{
    compute_diff, exit_codes, load_releases, output_report, write_layers, PipelineError,
};
use attack_diff::reports::{ReportConfig, ReportFormat};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 7, 1).expect("valid date")
}

fn builder() -> DiffConfigBuilder {
    DiffConfigBuilder::new()
        .old_path(fixture_path("old"))
        .new_path(fixture_path("new"))
        .output_format(ReportFormat::None)
        .quiet(true)
        .release_date(release_date())
}

fn build(builder: DiffConfigBuilder) -> DiffConfig {
    builder.build().expect("config")
}

// ============================================================================
// Stage Tests
// ============================================================================

mod stages {
    use super::*;

    #[test]
    fn load_and_diff_fixture_releases() {
        let config = build(builder().minor_changes(true));
        let releases = load_releases(&config).expect("load");
        assert_eq!(releases.old.domains().count(), 3);

        let report = compute_diff(&config, &releases).expect("diff");
        assert_eq!(report.summary.total_changes, 9);
        assert!(report.minor_changes_included);
    }

    #[test]
    fn load_fails_for_missing_directory() {
        let config = build(builder().old_path(fixture_path("missing")));
        let err = load_releases(&config).expect_err("missing directory");
        assert!(format!("{err:#}").contains("missing"));
    }

    #[test]
    fn layer_file_count_mismatch_is_reported() {
        let config = build(builder().types(vec![ObjectKind::Technique]));
        let releases = load_releases(&config).expect("load");
        let report = compute_diff(&config, &releases).expect("diff");

        let dir = tempfile::tempdir().expect("tempdir");
        let err = write_layers(
            &report,
            &ReportConfig::default(),
            &[dir.path().join("only-one.json")],
            true,
        )
        .expect_err("three domains, one file");
        assert!(err.to_string().contains("expected 3, got 1"));
    }
}

// ============================================================================
// Output Tests
// ============================================================================

mod outputs {
    use super::*;

    #[test]
    fn writes_markdown_and_layers_to_requested_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        let markdown = dir.path().join("notes").join("changelog.md");
        let layers: Vec<PathBuf> = ["ent.json", "mobile.json"]
            .iter()
            .map(|name| dir.path().join("layers").join(name))
            .collect();

        let config = build(
            builder()
                .domains(vec![Domain::Enterprise, Domain::Mobile])
                .markdown(Some(markdown.clone()))
                .layers(layers.clone())
                .site_prefix("https://attack.mitre.org"),
        );
        let releases = load_releases(&config).expect("load");
        let report = compute_diff(&config, &releases).expect("diff");
        output_report(&config, &report).expect("output");

        let changelog = std::fs::read_to_string(&markdown).expect("markdown written");
        assert!(changelog.starts_with("### Techniques\n\n**Enterprise**\n\n"));
        assert!(changelog.contains("**Mobile**"));
        assert!(!changelog.contains("PRE-ATT&CK"));

        let mobile: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&layers[1]).expect("layer written"))
                .expect("layer json");
        assert_eq!(mobile["domain"], "mitre-mobile");
        assert_eq!(mobile["name"], "July 2020 Mobile Updates");
        assert_eq!(mobile["techniques"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn writes_json_report_to_output_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let output = dir.path().join("diff.json");
        let config = build(
            builder()
                .output_format(ReportFormat::Json)
                .output_file(Some(output.clone()))
                .types(vec![ObjectKind::Group]),
        );

        let releases = load_releases(&config).expect("load");
        let report = compute_diff(&config, &releases).expect("diff");
        output_report(&config, &report).expect("output");

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(output).expect("read")).expect("json");
        assert_eq!(value["summary"]["additions"], 1);
        assert_eq!(value["metadata"]["tool"]["name"], "attack-diff");
    }
}

// ============================================================================
// CLI Handler Tests
// ============================================================================

mod cli_handlers {
    use super::*;

    #[test]
    fn fail_on_change_sets_exit_code() {
        let code = run_diff(build(builder().fail_on_change(true))).expect("run");
        assert_eq!(code, exit_codes::CHANGES_DETECTED);

        let code = run_diff(build(builder())).expect("run");
        assert_eq!(code, exit_codes::SUCCESS);
    }

    #[test]
    fn no_changes_keeps_success_with_fail_on_change() {
        let config = build(
            builder()
                .new_path(fixture_path("old"))
                .fail_on_change(true),
        );
        assert_eq!(run_diff(config).expect("run"), exit_codes::SUCCESS);
    }

    #[test]
    fn load_errors_surface_as_pipeline_errors() {
        let config = build(builder().new_path(fixture_path("missing")));
        let err = run_diff(config).expect_err("missing new release");
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::LoadFailed { .. })
        ));
    }

    #[test]
    fn layers_without_techniques_are_rejected() {
        let config = build(builder().types(vec![ObjectKind::Group]).layers(Vec::new()));
        let err = run_diff(config).expect_err("invalid");
        assert!(err.to_string().contains("output.layers"));
    }

    #[test]
    fn file_config_and_cli_overrides_merge() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config_path = dir.path().join("attack-diff.yaml");
        std::fs::write(
            &config_path,
            "selection:\n  types: [software]\noutput:\n  minor_changes: true\n",
        )
        .expect("write config");

        let overrides = AppConfig::builder()
            .old_dir(fixture_path("old"))
            .new_dir(fixture_path("new"))
            .domains(vec![Domain::Enterprise])
            .build();
        let (merged, loaded_from) =
            AppConfig::from_file_with_overrides(Some(&config_path), &overrides);
        assert_eq!(loaded_from, Some(config_path));

        let config = DiffConfigBuilder::from_app_config(&merged)
            .output_format(ReportFormat::None)
            .build()
            .expect("config");
        assert_eq!(config.types, vec![ObjectKind::Software]);
        assert_eq!(config.domains, vec![Domain::Enterprise]);
        assert!(config.output.minor_changes);
        assert_eq!(run_diff(config).expect("run"), exit_codes::SUCCESS);
    }
}
