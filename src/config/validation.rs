//! Configuration validation for attack-diff.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, DiffConfig, OutputConfig, SelectionConfig};
use crate::model::ObjectKind;
use std::collections::HashSet;
use std::hash::Hash;
use std::path::Path;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.selection.validate());
        errors.extend(self.output.validate());
        errors.extend(validate_layer_request(
            &self.output,
            &self.selection.types,
            self.selection.domains.len(),
        ));
        errors
    }
}

impl Validatable for DiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let selection = SelectionConfig {
            types: self.types.clone(),
            domains: self.domains.clone(),
        };
        let mut errors = selection.validate();
        errors.extend(self.output.validate());
        errors.extend(validate_layer_request(
            &self.output,
            &self.types,
            self.domains.len(),
        ));
        errors
    }
}

impl Validatable for SelectionConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.types.is_empty() {
            errors.push(ConfigError::new(
                "selection.types",
                "at least one object kind must be selected",
            ));
        }
        if self.domains.is_empty() {
            errors.push(ConfigError::new(
                "selection.domains",
                "at least one domain must be selected",
            ));
        }
        if has_duplicates(&self.types) {
            errors.push(ConfigError::new(
                "selection.types",
                "object kinds must not repeat",
            ));
        }
        if has_duplicates(&self.domains) {
            errors.push(ConfigError::new(
                "selection.domains",
                "domains must not repeat",
            ));
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            errors.extend(check_parent_exists("output.file", file_path));
        }
        if let Some(ref markdown) = self.markdown_file {
            if markdown.as_os_str().is_empty() {
                errors.push(ConfigError::new(
                    "output.markdown_file",
                    "path must not be empty",
                ));
            }
        }
        if self.site_prefix.ends_with('/') {
            errors.push(ConfigError::new(
                "output.site_prefix",
                format!(
                    "'{}' must not end with '/'; link paths already start with one",
                    self.site_prefix
                ),
            ));
        }

        errors
    }
}

fn validate_layer_request(
    output: &OutputConfig,
    types: &[ObjectKind],
    domain_count: usize,
) -> Vec<ConfigError> {
    let mut errors = Vec::new();
    if !output.wants_layers() {
        return errors;
    }

    if !types.contains(&ObjectKind::Technique) {
        errors.push(ConfigError::new(
            "output.layers",
            "layers need the technique kind in selection.types",
        ));
    }
    if !output.layer_files.is_empty() && output.layer_files.len() != domain_count {
        errors.push(ConfigError::new(
            "output.layer_files",
            format!(
                "expected one layer file per selected domain ({domain_count}), got {}",
                output.layer_files.len()
            ),
        ));
    }
    errors
}

fn check_parent_exists(field: &str, path: &Path) -> Option<ConfigError> {
    let parent = path.parent()?;
    if parent.as_os_str().is_empty() || parent.exists() {
        return None;
    }
    Some(ConfigError::new(
        field,
        format!("Parent directory does not exist: {}", parent.display()),
    ))
}

fn has_duplicates<T: Eq + Hash>(items: &[T]) -> bool {
    let mut seen = HashSet::new();
    !items.iter().all(|item| seen.insert(item))
}
