//! Registry view command handlers: `tree`, `index` and `paths`.

use crate::config::AppConfig;
use crate::pipeline::{exit_codes, load_catalog, output_report};
use crate::registry::filter_index;
use crate::reports::{IndexView, TreeLayout};
use anyhow::Result;

/// How the tree view starts out.
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    /// Open every node
    pub expand_all: bool,
    /// Start with every node closed, ignoring the configured defaults
    pub collapse_all: bool,
    /// Extra paths to open, with their ancestors
    pub expand: Vec<String>,
}

/// Run the `tree` command.
pub fn run_tree(config: &AppConfig, options: &TreeOptions, quiet: bool) -> Result<i32> {
    let catalog = load_catalog(config, quiet)?;

    let mut expansion = config.tree.initial_expansion();
    if options.collapse_all {
        expansion.collapse_all();
    }
    if options.expand_all {
        expansion.expand_all(&catalog.tree);
    }
    for path in &options.expand {
        if catalog.tree.find(path, &catalog.table).is_none() {
            tracing::warn!("Path '{}' is not in the tree", path);
        }
        expansion.reveal(path, &catalog.table);
    }

    let layout = TreeLayout {
        hive_order: &config.tree.hive_order,
        expansion: &expansion,
    };
    output_report(&config.output, quiet, |reporter| {
        reporter.render_tree(&catalog.tree, &layout)
    })?;
    Ok(exit_codes::SUCCESS)
}

/// Run the `index` command: the flat key index, optionally searched.
pub fn run_index(
    config: &AppConfig,
    search: Option<&str>,
    view: IndexView,
    quiet: bool,
) -> Result<i32> {
    let catalog = load_catalog(config, quiet)?;
    let entries = filter_index(&catalog.index, search.unwrap_or_default());

    output_report(&config.output, quiet, |reporter| {
        reporter.render_index(&entries, view)
    })?;

    if search.is_some() && entries.is_empty() {
        Ok(exit_codes::NO_MATCHES)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

/// Run the `paths` command: every node path of the tree, depth-first.
pub fn run_paths(config: &AppConfig, quiet: bool) -> Result<i32> {
    let catalog = load_catalog(config, quiet)?;
    let paths = catalog.tree.all_paths();

    output_report(&config.output, quiet, |reporter| reporter.render_paths(&paths))?;
    Ok(exit_codes::SUCCESS)
}
