//! **Categorized diffs of MITRE ATT&CK releases.**
//!
//! `attack-diff` compares two releases of the ATT&CK knowledge base, each a
//! directory of STIX 2 bundles (one per domain), and classifies every
//! technique, software, group and mitigation as added, changed, minor-changed,
//! revoked, deprecated or deleted.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: typed records, bundles, releases and per-(kind, domain)
//!   [`Snapshot`]s.
//! - **[`parsers`]**: reads STIX bundles from a release directory.
//! - **[`diff`]**: the [`DiffEngine`] and the per-object classification rules.
//! - **[`reports`]**: Markdown changelog, Navigator layers, JSON and terminal
//!   summary output.
//! - **[`pipeline`]**: load → diff → report orchestration shared by the CLI.
//! - **[`config`]**: YAML config files, CLI merging and validation.
//!
//! ## Diffing Two Releases
//!
//! ```no_run
//! use attack_diff::model::{Domain, ObjectKind};
//! use attack_diff::parsers::{load_release, DirectorySource};
//! use attack_diff::DiffEngine;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let old = load_release(&DirectorySource::new("v6"), &Domain::ALL)?;
//!     let new = load_release(&DirectorySource::new("v7"), &Domain::ALL)?;
//!
//!     let report = DiffEngine::new().diff_all(&old, &new, &ObjectKind::ALL, &Domain::ALL)?;
//!     for diff in report.domain_diffs() {
//!         println!(
//!             "{} {}: {} new, {} changed",
//!             diff.domain,
//!             diff.kind.plural(),
//!             diff.additions.len(),
//!             diff.changes.len()
//!         );
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! The `attack-diff` binary wraps the library: `attack-diff diff --old v6 --new v7 --markdown`.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools,
    // Variable names like `old`/`new` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, BehaviorConfig, OutputConfig, SelectionConfig};
pub use config::{ConfigError, Validatable};
pub use config::{DiffConfig, DiffConfigBuilder};
pub use diff::{ChangeStatus, Classification, DiffEngine, DiffReport, DomainDiff};
pub use error::{AttackDiffError, ErrorContext, OptionContext, Result};
pub use model::{AttackRecord, Domain, ObjectKind, Release, Snapshot, StixBundle};
pub use parsers::{load_release, parse_bundle_file, parse_bundle_str, BundleParser};
pub use reports::{ReportFormat, ReportGenerator};
