//! Change classification between two ATT&CK releases.
//!
//! The engine works per (kind, domain) pair:
//!
//! 1. set algebra over the two snapshots' identifiers gives additions and
//!    deletions
//! 2. every identifier present on both sides goes through [`classify`]
//! 3. the resulting [`ClassificationResult`] is materialized into a
//!    [`DomainDiff`] and collected into a [`DiffReport`]
//!
//! Nothing here performs I/O. Revocation links are resolved through the
//! [`RelationshipQuery`] trait.
//!
//! # Example
//!
//! ```ignore
//! use attack_diff::diff::DiffEngine;
//!
//! let engine = DiffEngine::new().with_minor_changes(true);
//! let report = engine.diff_all(&old_release, &new_release, &kinds, &domains)?;
//! println!("{} changes", report.summary.total_changes);
//! ```

mod classify;
mod engine;
mod result;
mod status;
pub mod traits;
mod version;

pub use classify::{classify, Classification, ClassifyError, RevocationLink};
pub use engine::DiffEngine;
pub use result::{
    ChangeEntry, ClassificationResult, Diagnostic, DiagnosticKind, DiffReport, DiffSummary,
    DomainDiff,
};
pub use status::ChangeStatus;
pub use traits::{NoRelationships, RelationshipQuery};
pub use version::{
    parse_timestamp, parse_version, Side, TimestampParseError, VersionParseError,
};
