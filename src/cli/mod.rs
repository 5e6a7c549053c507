//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand
//! and returns the process exit code.

mod catalog;
mod registry;
mod template;

pub use catalog::{run_list, run_show, run_tags};
pub use registry::{run_index, run_paths, run_tree, TreeOptions};
pub use template::{run_config, run_template, ConfigOutput};

// Re-export config types used by handlers
pub use crate::catalog::CatalogQuery;
pub use crate::config::AppConfig;

use crate::config::Validatable;
use crate::error::LolregError;

/// Check a merged configuration, logging every problem found.
///
/// Returns an error naming the number of problems when there are any.
pub fn validate_config(config: &AppConfig) -> anyhow::Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    for error in &errors {
        tracing::error!("Invalid configuration: {}", error);
    }
    Err(LolregError::config(format!("{} problem(s) found", errors.len())).into())
}
