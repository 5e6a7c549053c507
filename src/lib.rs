//! **A catalog engine for Windows registry keys abused by attackers.**
//!
//! `lolreg` loads a set of technique records, each a YAML file naming one or
//! more registry key paths, and derives two navigable views of every path they
//! mention: a hierarchical [`RegistryTree`] and a flat, deduplicated key
//! index of [`FlatIndexEntry`] values. Paths written by different authors in
//! different casings (`HKEY_LOCAL_MACHINE\Software` vs `HKLM\SOFTWARE`) are
//! normalized first, so they land on the same node and the same index entry.
//!
//! ## Core Concepts & Modules
//!
//! - **[`registry`]**: path normalization, the tree, the key index and
//!   expand / collapse state. Everything here is a pure function of the
//!   records.
//! - **[`model`]**: the [`Record`] type and the [`RecordStore`] that holds a
//!   loaded record set.
//! - **[`loader`]**: reads a data directory of record files.
//! - **[`catalog`]**: free-text and tag search over records.
//! - **[`reports`]**: text, JSON and Markdown renderings of every view.
//! - **[`pipeline`]** and **[`cli`]**: the load → derive → report workflow
//!   behind the `lolreg` binary.
//!
//! ## Getting Started
//!
//! ```
//! use lolreg::model::Record;
//! use lolreg::registry::{build_index, build_tree};
//!
//! let records = vec![
//!     Record::new("r1", "Run key").with_keys([r"HKCU\Software\Run"]),
//!     Record::new("r2", "Run key again").with_keys([r"HKEY_CURRENT_USER\SOFTWARE\RUN"]),
//! ];
//!
//! let tree = build_tree(&records);
//! assert_eq!(tree.all_paths(), vec!["HKCU", r"HKCU\SOFTWARE", r"HKCU\SOFTWARE\Run"]);
//!
//! let index = build_index(&records);
//! assert_eq!(index.len(), 1);
//! assert_eq!(index[0].entries.len(), 2);
//! ```
//!
//! ### Loading a data directory
//!
//! ```no_run
//! use std::path::Path;
//! use lolreg::loader::load_records_dir;
//! use lolreg::registry::build_index;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = load_records_dir(Path::new("data"))?;
//!     for entry in build_index(store.records()) {
//!         println!("{} ({} techniques)", entry.path, entry.entries.len());
//!     }
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod registry;
pub mod reports;
pub mod template;

// Re-export main types for convenience
pub use catalog::{all_tags, CatalogQuery};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable};
pub use error::{ErrorContext, LolregError, OptionContext, Result};
pub use loader::{load_records_dir, parse_record_str};
pub use model::{Record, RecordRef, RecordStore};
pub use registry::{
    build_index, build_tree, list_all_paths, normalize, ExpansionState, FlatIndexEntry,
    RegistryTree, SegmentTable, TreeNode,
};
pub use reports::{ReportFormat, ReportGenerator};
