//! Loading stage: records from disk plus the views derived from them.

use super::PipelineError;
use crate::config::AppConfig;
use crate::loader::load_records_dir;
use crate::model::RecordStore;
use crate::registry::{build_index_with, FlatIndexEntry, RegistryTree, SegmentTable};
use std::path::Path;

/// A loaded record set with its tree and key index.
///
/// Both views are rebuilt from the records; nothing here is mutated after
/// construction.
#[derive(Debug)]
pub struct LoadedCatalog {
    pub store: RecordStore,
    pub table: SegmentTable,
    pub tree: RegistryTree,
    pub index: Vec<FlatIndexEntry>,
}

impl LoadedCatalog {
    /// Derive the views from an already loaded store.
    pub fn from_store(store: RecordStore, table: SegmentTable) -> Self {
        let tree = RegistryTree::build(store.records(), &table);
        let index = build_index_with(store.records(), &table);
        tracing::debug!(
            "Built tree with {} nodes and index with {} keys",
            tree.node_count(),
            index.len()
        );
        Self {
            store,
            table,
            tree,
            index,
        }
    }
}

/// Load the configured data directory and build the derived views.
pub fn load_catalog(config: &AppConfig, quiet: bool) -> Result<LoadedCatalog, PipelineError> {
    let dir = config.data.effective_dir();
    load_catalog_from(&dir, config.registry.segment_table(), quiet)
}

/// Load a specific directory with the given segment table.
pub fn load_catalog_from(
    dir: &Path,
    table: SegmentTable,
    quiet: bool,
) -> Result<LoadedCatalog, PipelineError> {
    if !quiet {
        tracing::info!("Loading records from {}", dir.display());
    }

    let store = load_records_dir(dir).map_err(|source| PipelineError::LoadFailed {
        path: dir.display().to_string(),
        source,
    })?;

    Ok(LoadedCatalog::from_store(store, table))
}
