//! Config command handler.
//!
//! Shows, locates, initializes, and documents `.attack-diff.yaml` files.

use crate::config::{
    discover_config_file, generate_full_example_config, generate_json_schema, load_or_default,
    CONFIG_FILE_NAMES,
};
use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};

/// Sub-subcommands for the `config` command
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .attack-diff.yaml in the current directory
    Init,
    /// Print the JSON Schema of the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run a `config` action.
pub fn run_config(action: &ConfigAction, explicit: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = load_or_default(explicit);
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
            Ok(())
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 3] = [
                std::env::current_dir()
                    .ok()
                    .map(|p| p.display().to_string()),
                dirs::config_dir().map(|p| p.join("attack-diff").display().to_string()),
                dirs::home_dir().map(|p| p.display().to_string()),
            ];
            eprintln!("Config file search paths (in order):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match discover_config_file(explicit) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
            Ok(())
        }
        ConfigAction::Init => {
            let cwd = std::env::current_dir().context("cannot determine current directory")?;
            let target = init_config_in(&cwd)?;
            eprintln!("Created {}", target.display());
            Ok(())
        }
        ConfigAction::Schema { output } => {
            let schema = generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            Ok(())
        }
    }
}

/// Write the commented example config into `dir`, refusing to overwrite.
pub fn init_config_in(dir: &Path) -> Result<PathBuf> {
    let target = dir.join(CONFIG_FILE_NAMES[0]);
    if target.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first to re-initialize.",
            target.display()
        );
    }
    std::fs::write(&target, generate_full_example_config())
        .with_context(|| format!("failed to write {}", target.display()))?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_file;

    #[test]
    fn test_init_writes_loadable_config_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = init_config_in(dir.path()).expect("init");
        assert!(path.ends_with(".attack-diff.yaml"));
        assert!(load_config_file(&path).is_ok());
        assert!(init_config_in(dir.path()).is_err());
    }

    #[test]
    fn test_schema_to_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let output = dir.path().join("schema.json");
        run_config(
            &ConfigAction::Schema {
                output: Some(output.clone()),
            },
            None,
        )
        .expect("schema");
        let schema = std::fs::read_to_string(output).expect("read");
        assert!(schema.contains("\"selection\""));
    }
}
