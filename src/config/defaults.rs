//! Default values for attack-diff configuration.

use crate::model::Domain;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Directory holding the old release bundles.
pub const DEFAULT_OLD_DIR: &str = "old";

/// Directory holding the new release bundles.
pub const DEFAULT_NEW_DIR: &str = "new";

/// Directory receiving default Markdown and layer files.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// `output/updates-july-2020.md`
#[must_use]
pub fn default_markdown_path(date: NaiveDate) -> PathBuf {
    let month_year = date.format("%B-%Y").to_string().to_lowercase();
    PathBuf::from(DEFAULT_OUTPUT_DIR).join(format!("updates-{month_year}.md"))
}

/// `output/July_2020_Updates_Enterprise.json`
#[must_use]
pub fn default_layer_path(domain: Domain, date: NaiveDate) -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR).join(format!(
        "{}_Updates_{}.json",
        date.format("%B_%Y"),
        domain.file_suffix()
    ))
}

/// Default layer files for `domains`, in the same order.
#[must_use]
pub fn default_layer_paths(domains: &[Domain], date: NaiveDate) -> Vec<PathBuf> {
    domains
        .iter()
        .map(|&domain| default_layer_path(domain, date))
        .collect()
}
