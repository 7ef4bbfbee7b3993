//! attack-diff: categorized diff of ATT&CK STIX releases
//!
//! Compares two release directories of domain bundles and reports what was
//! added, changed, revoked, deprecated or deleted.

#![allow(clippy::struct_excessive_bools, clippy::needless_pass_by_value)]

use anyhow::Result;
use attack_diff::{
    cli::{self, ConfigAction},
    config::{AppConfig, DiffConfigBuilder},
    model::{Domain, ObjectKind},
    pipeline::exit_codes,
    reports::ReportFormat,
};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nDomains:",
        "\n  enterprise-attack, mobile-attack, pre-attack",
        "\n\nObject kinds:",
        "\n  technique, software, group, mitigation",
        "\n\nOutput Formats:",
        "\n  summary, json, markdown (stdout), Markdown changelog, Navigator layers (files)"
    )
}

#[derive(Parser)]
#[command(name = "attack-diff")]
#[command(version, long_version = build_long_version())]
#[command(about = "Categorized diff of ATT&CK STIX releases", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success (no changes, or no --fail-on-change)
    1  Changes detected with --fail-on-change
    3  Error occurred

EXAMPLES:
    # Summary of every change between two releases
    attack-diff diff --old v6 --new v7

    # Release changelog with links and key
    attack-diff diff --old v6 --new v7 --markdown --show-key \\
        --site-prefix https://attack.mitre.org

    # Navigator layers for techniques only
    attack-diff diff --types technique --layers

    # Machine-readable output
    attack-diff diff -o json > diff.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Directory of the old release [default: old]
    #[arg(long)]
    old: Option<PathBuf>,

    /// Directory of the new release [default: new]
    #[arg(long)]
    new: Option<PathBuf>,

    /// Object kinds to compare, in report order [default: all]
    #[arg(long, value_enum, num_args = 1.., value_delimiter = ',')]
    types: Option<Vec<ObjectKind>>,

    /// Domains to compare, in report order [default: all]
    #[arg(long, value_enum, num_args = 1.., value_delimiter = ',')]
    domains: Option<Vec<Domain>>,

    /// Write the Markdown changelog [default path: output/updates-<month>-<year>.md]
    #[arg(long, num_args = 0..=1, value_name = "FILE")]
    markdown: Option<Option<PathBuf>>,

    /// Write Navigator layers, one file per selected domain
    /// [default paths: output/<Month>_<Year>_Updates_<Domain>.json]
    #[arg(long, num_args = 0.., value_name = "FILE")]
    layers: Option<Vec<PathBuf>>,

    /// Prefix for Markdown links, e.g. https://attack.mitre.org
    #[arg(long)]
    site_prefix: Option<String>,

    /// Report changes that did not bump the object version
    #[arg(long)]
    minor_changes: bool,

    /// Prepend a key explaining each change type to the Markdown
    #[arg(long)]
    show_key: bool,

    /// Report printed to stdout [default: summary]
    #[arg(short, long, value_enum)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Exit with code 1 if any changes detected
    #[arg(long)]
    fail_on_change: bool,
}

impl DiffArgs {
    /// CLI values as a config layer to merge over the file config.
    fn to_overrides(&self, cli: &Cli) -> AppConfig {
        let mut builder = AppConfig::builder()
            .minor_changes(self.minor_changes)
            .show_key(self.show_key)
            .fail_on_change(self.fail_on_change)
            .quiet(cli.quiet)
            .no_color(cli.no_color)
            .output_file(self.output_file.clone());

        if let Some(old) = &self.old {
            builder = builder.old_dir(old);
        }
        if let Some(new) = &self.new {
            builder = builder.new_dir(new);
        }
        if let Some(types) = &self.types {
            builder = builder.types(types.clone());
        }
        if let Some(domains) = &self.domains {
            builder = builder.domains(domains.clone());
        }
        if let Some(file) = &self.markdown {
            builder = builder.markdown(file.clone());
        }
        if let Some(files) = &self.layers {
            builder = builder.layers(files.clone());
        }
        if let Some(prefix) = &self.site_prefix {
            builder = builder.site_prefix(prefix);
        }
        if let Some(format) = self.output {
            builder = builder.output_format(format);
        }
        builder.build()
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two ATT&CK releases
    Diff(DiffArgs),

    /// Show, discover, initialize, or document configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr)
                .with_ansi(!cli.no_color && std::env::var("NO_COLOR").is_err()),
        )
        .init();

    match &cli.command {
        Commands::Diff(args) => {
            let overrides = args.to_overrides(&cli);
            let (app_config, loaded_from) =
                AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
            if let Some(path) = loaded_from {
                tracing::debug!("Using config file {}", path.display());
            }

            let config = DiffConfigBuilder::from_app_config(&app_config).build()?;
            match cli::run_diff(config) {
                Ok(exit_code) => {
                    if exit_code != exit_codes::SUCCESS {
                        std::process::exit(exit_code);
                    }
                    Ok(())
                }
                Err(e) => {
                    eprintln!("Error: {e:#}");
                    std::process::exit(exit_codes::ERROR);
                }
            }
        }

        Commands::Config { action } => cli::run_config(action, cli.config.as_deref()),

        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "attack-diff", &mut io::stdout());
            Ok(())
        }
    }
}
