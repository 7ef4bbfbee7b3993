//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::model::{Domain, ObjectKind};
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".attack-diff.yaml",
    ".attack-diff.yml",
    "attack-diff.yaml",
    "attack-diff.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/attack-diff/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path.filter(|p| p.exists()) {
        return Some(path.to_path_buf());
    }

    let search_dirs = [
        std::env::current_dir().ok(),
        find_git_root(),
        dirs::config_dir().map(|dir| dir.join("attack-diff")),
        dirs::home_dir(),
    ];

    search_dirs
        .iter()
        .flatten()
        .find_map(|dir| find_config_in_dir(dir))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override, so CLI args
    /// layered over a file config keep file settings the CLI left alone.
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        // Paths
        if other.paths.old != defaults.paths.old {
            self.paths.old.clone_from(&other.paths.old);
        }
        if other.paths.new != defaults.paths.new {
            self.paths.new.clone_from(&other.paths.new);
        }

        // Selection
        if other.selection.types != ObjectKind::ALL {
            self.selection.types.clone_from(&other.selection.types);
        }
        if other.selection.domains != Domain::ALL {
            self.selection.domains.clone_from(&other.selection.domains);
        }

        // Output config - only override if explicitly set
        if other.output.format != ReportFormat::default() {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }
        if other.output.markdown {
            self.output.markdown = true;
        }
        if other.output.markdown_file.is_some() {
            self.output.markdown_file.clone_from(&other.output.markdown_file);
        }
        if other.output.layers {
            self.output.layers = true;
        }
        if !other.output.layer_files.is_empty() {
            self.output.layer_files.clone_from(&other.output.layer_files);
        }
        if !other.output.site_prefix.is_empty() {
            self.output.site_prefix.clone_from(&other.output.site_prefix);
        }
        if other.output.minor_changes {
            self.output.minor_changes = true;
        }
        if other.output.show_key {
            self.output.show_key = true;
        }

        // Behavior config (booleans - if set to true, override)
        if other.behavior.fail_on_change {
            self.behavior.fail_on_change = true;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# ATT&CK Diff Configuration
# Place this file at .attack-diff.yaml in your project root or ~/.config/attack-diff/

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# ATT&CK Diff Configuration File
# ===============================
#
# Place it at:
#   - .attack-diff.yaml in your project root
#   - ~/.config/attack-diff/attack-diff.yaml for global config
#
# CLI arguments always override file settings.

# Release directories, each holding <domain>.json bundles
paths:
  old: old
  new: new

# What to compare (report order follows these lists)
selection:
  # technique, software, group, mitigation
  types: [technique, software, group, mitigation]
  # enterprise-attack, mobile-attack, pre-attack
  domains: [enterprise-attack, mobile-attack, pre-attack]

# Output configuration
output:
  # Format printed to stdout: summary, json, markdown, none
  format: summary
  # Output file path (omit for stdout)
  # file: report.json
  no_color: false
  # Markdown changelog (default path: output/updates-<month>-<year>.md)
  markdown: false
  # markdown_file: output/changelog.md
  # Navigator layers, one per selected domain
  # (default paths: output/<Month>_<Year>_Updates_<Domain>.json)
  layers: false
  # layer_files: [ent.json, mobile.json, pre.json]
  # Prefix for Markdown links
  site_prefix: ''
  # Report changes that did not bump x_mitre_version
  minor_changes: false
  # Prepend the change-type key to the Markdown
  show_key: false

# Behavior flags
behavior:
  # Exit with code 1 if any changes detected
  fail_on_change: false
  # Suppress non-essential output
  quiet: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".attack-diff.yaml");
        std::fs::write(&config_path, "output:\n  minor_changes: true\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
paths:
  old: releases/v6
selection:
  types: [technique]
output:
  site_prefix: https://attack.mitre.org
behavior:
  fail_on_change: true
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.paths.old, PathBuf::from("releases/v6"));
        assert_eq!(config.paths.new, PathBuf::from("new"));
        assert_eq!(config.selection.types, vec![ObjectKind::Technique]);
        assert_eq!(config.output.site_prefix, "https://attack.mitre.org");
        assert!(config.behavior.fail_on_change);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_parse_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("bad.yaml");
        std::fs::write(&config_path, "selection:\n  types: [tactic]\n").unwrap();
        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::builder()
            .old_dir("file-old")
            .site_prefix("https://example.org")
            .types(vec![ObjectKind::Group])
            .build();
        let cli = AppConfig::builder()
            .new_dir("cli-new")
            .minor_changes(true)
            .build();

        base.merge(&cli);

        assert_eq!(base.paths.old, PathBuf::from("file-old"));
        assert_eq!(base.paths.new, PathBuf::from("cli-new"));
        assert_eq!(base.selection.types, vec![ObjectKind::Group]);
        assert_eq!(base.output.site_prefix, "https://example.org");
        assert!(base.output.minor_changes);
    }

    #[test]
    fn test_generate_example_config() {
        let example = generate_example_config();
        assert!(example.contains("selection:"));
        assert!(example.contains("site_prefix"));
        let parsed: AppConfig =
            serde_yaml::from_str(&generate_full_example_config()).expect("full example parses");
        assert_eq!(parsed.selection.domains, Domain::ALL.to_vec());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "output:\n  show_key: true").unwrap();

        let discovered = discover_config_file(Some(&config_path));
        assert_eq!(discovered, Some(config_path));
    }
}
