//! Report type definitions.

use crate::registry::{ExpansionState, RegistryTree, TreeNode, SEPARATOR};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Pick from the output file extension, plain text otherwise
    #[default]
    Auto,
    /// Aligned plain text for the terminal
    Text,
    /// Structured JSON output
    Json,
    /// Human-readable Markdown
    #[value(alias = "md")]
    Markdown,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

/// Layout of the key index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexView {
    /// Entries grouped under their hive
    #[default]
    Hive,
    /// One flat, path-sorted list
    Alphabetical,
}

/// What a tree report shows: root hive order and which nodes are open.
#[derive(Debug, Clone, Copy)]
pub struct TreeLayout<'a> {
    pub hive_order: &'a [String],
    pub expansion: &'a ExpansionState,
}

/// One visible line of the tree view.
#[derive(Debug, Clone)]
pub struct TreeRow<'a> {
    /// 0 for hives
    pub depth: usize,
    pub name: &'a str,
    /// Full path from the hive down
    pub path: String,
    pub node: &'a TreeNode,
    /// Whether the node is open and its children follow
    pub expanded: bool,
}

impl TreeLayout<'_> {
    /// Rows that are visible under this layout, in display order.
    ///
    /// Hives follow `hive_order`; siblings below them are sorted. Children of
    /// collapsed nodes are skipped.
    pub fn visible_rows<'t>(&self, tree: &'t RegistryTree) -> Vec<TreeRow<'t>> {
        let mut rows = Vec::new();
        let mut stack: Vec<(usize, &'t str, String, &'t TreeNode)> = tree
            .hives(self.hive_order)
            .into_iter()
            .rev()
            .map(|(name, node)| (0, name, name.to_string(), node))
            .collect();

        while let Some((depth, name, path, node)) = stack.pop() {
            let expanded = node.has_children() && self.expansion.is_expanded(&path);
            if expanded {
                for (child_name, child) in node.sorted_children().into_iter().rev() {
                    stack.push((
                        depth + 1,
                        child_name,
                        format!("{path}{SEPARATOR}{child_name}"),
                        child,
                    ));
                }
            }
            rows.push(TreeRow {
                depth,
                name,
                path,
                node,
                expanded,
            });
        }

        rows
    }
}
