//! CLI command handlers.
//!
//! Testable command handlers invoked by main.rs. Each handler implements the
//! business logic for a specific CLI subcommand.

mod config;
mod diff;

pub use config::{init_config_in, run_config, ConfigAction};
pub use diff::run_diff;

// Re-export config types used by handlers
pub use crate::config::DiffConfig;
