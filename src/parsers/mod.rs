//! STIX bundle loading.
//!
//! A release is a directory holding one bundle per domain
//! (`enterprise-attack.json`, `mobile-attack.json`, `pre-attack.json`).
//! Bundles are parsed into [`StixBundle`]s keeping only the object types the
//! diff tracks plus relationships.
//!
//! ## Usage
//!
//! ```no_run
//! use attack_diff::model::Domain;
//! use attack_diff::parsers::{load_release, DirectorySource};
//!
//! let source = DirectorySource::new("releases/v8");
//! let release = load_release(&source, &Domain::ALL).unwrap();
//! println!("{} records", release.record_count());
//! ```

mod bundle;
mod source;

pub use bundle::BundleParser;
pub use source::{load_release, BundleSource, DirectorySource};

use crate::error::{AttackDiffError, Result};
use crate::model::StixBundle;
use std::path::Path;

/// Maximum bundle file size (512 MB).
const MAX_BUNDLE_FILE_SIZE: u64 = 512 * 1024 * 1024;

/// Read and parse a bundle file.
///
/// Returns an error if the file exceeds [`MAX_BUNDLE_FILE_SIZE`] to prevent OOM.
pub fn parse_bundle_file(path: &Path) -> Result<StixBundle> {
    let metadata = std::fs::metadata(path).map_err(|e| AttackDiffError::io(path, e))?;
    if metadata.len() > MAX_BUNDLE_FILE_SIZE {
        return Err(AttackDiffError::validation(format!(
            "{} is {} MB, exceeding the {} MB limit",
            path.display(),
            metadata.len() / (1024 * 1024),
            MAX_BUNDLE_FILE_SIZE / (1024 * 1024),
        )));
    }
    let content = std::fs::read_to_string(path).map_err(|e| AttackDiffError::io(path, e))?;
    parse_bundle_str(&content)
}

/// Parse a bundle from string content
pub fn parse_bundle_str(content: &str) -> Result<StixBundle> {
    BundleParser::new().parse_str(content)
}
