//! Configuration module for attack-diff.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use attack_diff::config::{AppConfig, DiffConfigBuilder};
//!
//! let config = AppConfig::builder()
//!     .old_dir("releases/v6")
//!     .new_dir("releases/v7")
//!     .minor_changes(true)
//!     .build();
//!
//! // Load from file
//! use attack_diff::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! let diff = DiffConfigBuilder::from_app_config(&config).build()?;
//! ```
//!
//! # Configuration File
//!
//! Place a `.attack-diff.yaml` file in your project root or `~/.config/attack-diff/`:
//!
//! ```yaml
//! selection:
//!   types: [technique, group]
//! output:
//!   site_prefix: https://attack.mitre.org
//!   markdown: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    default_layer_path, default_layer_paths, default_markdown_path, DEFAULT_NEW_DIR,
    DEFAULT_OLD_DIR, DEFAULT_OUTPUT_DIR,
};
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, DiffConfig, DiffConfigBuilder, DiffPaths,
    OutputConfig, PathsConfig, SelectionConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Documents every option accepted in `.attack-diff.yaml`, for editor
/// validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
