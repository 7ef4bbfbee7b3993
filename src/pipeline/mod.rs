//! Pipeline orchestration for release diffs.
//!
//! Shared load → diff → report logic used by the CLI command handlers.

mod diff_stage;
mod output;
mod parse;
mod report_stage;

pub use diff_stage::compute_diff;
pub use output::{should_use_color, write_file_creating_dirs, write_output, OutputTarget};
pub use parse::{load_release_dir, load_releases, LoadedReleases};
pub use report_stage::{output_report, write_layers, write_markdown};

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or parse a release
    #[error("Load failed for {path}: {source}")]
    LoadFailed {
        path: String,
        source: anyhow::Error,
    },

    /// Diff computation failed
    #[error("Diff failed: {source}")]
    DiffFailed {
        #[source]
        source: anyhow::Error,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no changes detected (or no --fail-on-change)
    pub const SUCCESS: i32 = 0;
    /// Changes were detected
    pub const CHANGES_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
