//! Registry path engine.
//!
//! Everything the tree and key-index views need, computed from a record
//! slice:
//!
//! - [`normalize`] / [`SegmentTable`]: canonical casing of registry paths
//! - [`build_tree`] / [`RegistryTree`]: nested view keyed by path segment
//! - [`build_index`] / [`FlatIndexEntry`]: one entry per distinct path
//! - [`ExpansionState`]: expand / collapse bookkeeping for the tree view
//!
//! All builders are pure: they take the records by reference and return new
//! structures on every call.
//!
//! # Example
//!
//! ```
//! use lolreg::model::Record;
//! use lolreg::registry::{build_index, build_tree, normalize};
//!
//! assert_eq!(normalize(r"HKEY_CURRENT_USER\software\RUN"), r"HKCU\SOFTWARE\Run");
//!
//! let records = vec![
//!     Record::new("r1", "Run key").with_keys([r"HKCU\Software\Run"]),
//!     Record::new("r2", "Run key (long form)").with_keys([r"HKEY_CURRENT_USER\SOFTWARE\RUN"]),
//! ];
//!
//! let tree = build_tree(&records);
//! assert_eq!(tree.all_paths(), vec!["HKCU", r"HKCU\SOFTWARE", r"HKCU\SOFTWARE\Run"]);
//!
//! let index = build_index(&records);
//! assert_eq!(index.len(), 1);
//! assert_eq!(index[0].entries.len(), 2);
//! ```

mod expansion;
mod index;
mod lookup;
mod normalize;
mod tree;

pub use expansion::ExpansionState;
pub use index::{build_index, build_index_with, filter_index, group_by_hive, FlatIndexEntry};
pub use lookup::CaseFoldMap;
pub use normalize::{
    hive_of, normalize, SegmentTable, DEFAULT_HIVE_ALIASES, DEFAULT_SEGMENTS, SEPARATOR,
};
pub use tree::{build_tree, list_all_paths, RegistryTree, TreeNode};
