//! Report output stage.
//!
//! Writes the Markdown changelog and Navigator layers when requested, then
//! prints the selected report format to stdout or the output file.

use crate::config::DiffConfig;
use crate::diff::DiffReport;
use crate::reports::{
    create_reporter_with_options, LayerReporter, MarkdownReporter, ReportConfig, ReportError,
    ReportFormat, ReportGenerator,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::{should_use_color, write_file_creating_dirs, write_output, OutputTarget};

/// Write every requested output of a diff run.
pub fn output_report(config: &DiffConfig, report: &DiffReport) -> Result<()> {
    let report_config = config.report_config();

    if let Some(path) = config.markdown_path() {
        write_markdown(report, &report_config, &path, config.behavior.quiet)?;
    }
    if let Some(paths) = config.layer_paths() {
        write_layers(report, &report_config, &paths, config.behavior.quiet)?;
    }

    if config.output.format == ReportFormat::None {
        return Ok(());
    }

    let target = OutputTarget::from_option(config.output.file.clone());
    let use_color = should_use_color(config.output.no_color) && target.is_terminal();
    let reporter = create_reporter_with_options(config.output.format, use_color)?;
    let content = reporter.generate(report, &report_config)?;
    write_output(&content, &target, config.behavior.quiet)
}

/// Render the Markdown changelog to `path`.
pub fn write_markdown(
    report: &DiffReport,
    report_config: &ReportConfig,
    path: &Path,
    quiet: bool,
) -> Result<()> {
    let content = MarkdownReporter::new().generate(report, report_config)?;
    write_file_creating_dirs(path, &content)
        .context("Failed to write Markdown changelog")?;
    if !quiet {
        tracing::info!("Markdown changelog written to {}", path.display());
    }
    Ok(())
}

/// Render one Navigator layer per domain, pairing `paths` with the
/// report's domains in order.
pub fn write_layers(
    report: &DiffReport,
    report_config: &ReportConfig,
    paths: &[PathBuf],
    quiet: bool,
) -> Result<()> {
    let reporter = LayerReporter::new();
    let layers = reporter.generate_layers(report, report_config)?;
    if layers.len() != paths.len() {
        return Err(ReportError::LayerFileCount {
            expected: layers.len(),
            actual: paths.len(),
        }
        .into());
    }

    for ((domain, layer), path) in layers.iter().zip(paths) {
        let json = reporter.to_json(layer)?;
        write_file_creating_dirs(path, &json)
            .with_context(|| format!("Failed to write {domain} layer"))?;
        if !quiet {
            tracing::info!(
                "{} layer written to {} ({} techniques)",
                domain.label(),
                path.display(),
                layer.techniques.len()
            );
        }
    }
    Ok(())
}
