//! Catalog command handlers: `list`, `show` and `tags`.

use crate::catalog::{all_tags, CatalogQuery};
use crate::config::AppConfig;
use crate::pipeline::{exit_codes, load_catalog, output_report};
use anyhow::Result;

/// Run the `list` command: the catalog, optionally filtered.
///
/// Returns [`exit_codes::NO_MATCHES`] when a filter was given and nothing
/// matched.
pub fn run_list(config: &AppConfig, query: &CatalogQuery, quiet: bool) -> Result<i32> {
    let catalog = load_catalog(config, quiet)?;
    let matches = query.filter(catalog.store.records());
    tracing::debug!(
        "{} of {} records match {:?}",
        matches.len(),
        catalog.store.len(),
        query
    );

    output_report(&config.output, quiet, |reporter| {
        reporter.render_catalog(&matches)
    })?;

    let filtered = query.term.is_some() || query.tag.is_some();
    if filtered && matches.is_empty() {
        Ok(exit_codes::NO_MATCHES)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

/// Run the `show` command: detail view of one record.
pub fn run_show(config: &AppConfig, id: &str, quiet: bool) -> Result<i32> {
    let catalog = load_catalog(config, quiet)?;
    let Some(record) = catalog.store.get(id.trim()) else {
        tracing::warn!("No technique with id '{}'", id);
        return Ok(exit_codes::NO_MATCHES);
    };

    output_report(&config.output, quiet, |reporter| {
        reporter.render_record(record)
    })?;
    Ok(exit_codes::SUCCESS)
}

/// Run the `tags` command: every distinct tag, first-seen first.
pub fn run_tags(config: &AppConfig, quiet: bool) -> Result<i32> {
    let catalog = load_catalog(config, quiet)?;
    let tags = all_tags(catalog.store.records());

    output_report(&config.output, quiet, |reporter| reporter.render_tags(&tags))?;
    Ok(exit_codes::SUCCESS)
}
