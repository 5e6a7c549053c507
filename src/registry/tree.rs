//! Hierarchical view of every registry path in the record set.

use super::lookup::CaseFoldMap;
use super::normalize::{SegmentTable, SEPARATOR};
use crate::model::{Record, RecordRef};
use serde::Serialize;
use std::cmp::Ordering;

/// One path segment in the registry tree.
///
/// Children are keyed case-insensitively: the first record that reaches a
/// segment fixes its casing (after the segment table has been applied), and
/// later case-variants land on the same node.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TreeNode {
    children: CaseFoldMap<TreeNode>,
    entries: Vec<RecordRef>,
}

impl TreeNode {
    /// Child nodes in insertion order.
    pub fn children(&self) -> &CaseFoldMap<TreeNode> {
        &self.children
    }

    /// Case-insensitive child lookup.
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.get(name)
    }

    /// Records whose key path ends exactly at this node.
    pub fn entries(&self) -> &[RecordRef] {
        &self.entries
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn has_entries(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Children sorted lexicographically by segment name, for display.
    pub fn sorted_children(&self) -> Vec<(&str, &TreeNode)> {
        let mut children: Vec<(&str, &TreeNode)> = self.children.iter().collect();
        children.sort_by(|(a, _), (b, _)| a.cmp(b));
        children
    }

    fn attach(&mut self, record: &Record) {
        if !self.entries.iter().any(|e| e.id == record.id) {
            self.entries.push(record.to_ref());
        }
    }
}

/// Registry tree built from a record set.
///
/// The tree is a derived, read-only view: it is rebuilt from scratch when the
/// records change and offers no mutation API.
#[derive(Debug, Clone, Default, Serialize)]
#[must_use]
pub struct RegistryTree {
    root: TreeNode,
}

impl RegistryTree {
    /// Build the tree, normalizing each key path with `table`.
    ///
    /// Records without keys and paths without segments contribute nothing.
    pub fn build(records: &[Record], table: &SegmentTable) -> Self {
        let mut root = TreeNode::default();

        for record in records {
            for raw in &record.keys {
                let segments = table.segments(raw);
                if segments.is_empty() {
                    tracing::debug!("Skipping empty key path {:?} in '{}'", raw, record.id);
                    continue;
                }

                let mut node = &mut root;
                for segment in &segments {
                    node = node.children.get_or_insert_with(
                        segment,
                        str::to_string,
                        |_| TreeNode::default(),
                    );
                }
                node.attach(record);
            }
        }

        Self { root }
    }

    /// The unnamed root; its children are the hives.
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        !self.root.has_children()
    }

    /// Find the node for a path; segments are matched case-insensitively.
    ///
    /// The path is normalized with `table` first so long hive names resolve.
    pub fn find(&self, path: &str, table: &SegmentTable) -> Option<&TreeNode> {
        let segments = table.segments(path);
        if segments.is_empty() {
            return None;
        }
        segments
            .iter()
            .try_fold(&self.root, |node, segment| node.child(segment))
    }

    /// Every node path, depth-first, in child order.
    pub fn all_paths(&self) -> Vec<String> {
        list_all_paths(&self.root)
    }

    /// Number of nodes, root excluded.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&TreeNode> = vec![&self.root];
        while let Some(node) = stack.pop() {
            count += node.children.len();
            stack.extend(node.children.values());
        }
        count
    }

    /// Hives in display order.
    ///
    /// Hives named in `order` come first, in that order; the rest follow
    /// alphabetically.
    pub fn hives<S: AsRef<str>>(&self, order: &[S]) -> Vec<(&str, &TreeNode)> {
        let rank = |name: &str| {
            order
                .iter()
                .position(|h| h.as_ref().eq_ignore_ascii_case(name))
        };
        let mut hives: Vec<(&str, &TreeNode)> = self.root.children.iter().collect();
        hives.sort_by(|(a, _), (b, _)| match (rank(*a), rank(*b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        });
        hives
    }
}

/// Build the tree with the standard segment table.
pub fn build_tree(records: &[Record]) -> RegistryTree {
    RegistryTree::build(records, SegmentTable::standard())
}

/// Depth-first, pre-order enumeration of every node's full path below
/// `root`, following child insertion order.
///
/// Derived purely from the tree; used for bulk expand / collapse.
pub fn list_all_paths(root: &TreeNode) -> Vec<String> {
    let mut paths = Vec::new();
    let mut stack: Vec<(String, &TreeNode)> = root
        .children
        .iter()
        .rev()
        .map(|(name, child)| (name.to_string(), child))
        .collect();

    while let Some((path, node)) = stack.pop() {
        for (name, child) in node.children.iter().rev() {
            stack.push((format!("{path}{SEPARATOR}{name}"), child));
        }
        paths.push(path);
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, keys: &[&str]) -> Record {
        Record::new(id, id.to_uppercase()).with_keys(keys.iter().copied())
    }

    #[test]
    fn test_case_variants_share_nodes() {
        let records = vec![
            record("r1", &[r"HKCU\Software\Run"]),
            record("r2", &[r"HKEY_CURRENT_USER\SOFTWARE\RUN"]),
        ];
        let tree = build_tree(&records);

        assert_eq!(tree.all_paths(), vec!["HKCU", r"HKCU\SOFTWARE", r"HKCU\SOFTWARE\Run"]);

        let run = tree.find(r"HKCU\SOFTWARE\Run", SegmentTable::standard()).unwrap();
        let ids: Vec<&str> = run.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r2"]);
        assert!(!run.has_children());
        assert!(run.has_entries());
    }

    #[test]
    fn test_unknown_segment_first_casing_wins() {
        let records = vec![
            record("a", &[r"HKLM\SOFTWARE\WinDefend"]),
            record("b", &[r"HKLM\SOFTWARE\windefend"]),
        ];
        let tree = build_tree(&records);
        let software = tree.find(r"HKLM\SOFTWARE", SegmentTable::standard()).unwrap();
        assert_eq!(software.children().keys().collect::<Vec<_>>(), vec!["WinDefend"]);
        assert_eq!(software.child("WINDEFEND").unwrap().entries().len(), 2);
    }

    #[test]
    fn test_record_attached_once_per_node() {
        let records = vec![record(
            "dup",
            &[r"HKLM\SYSTEM\Run", r"hklm\system\run", r"HKEY_LOCAL_MACHINE\System\RUN"],
        )];
        let tree = build_tree(&records);
        let node = tree.find(r"HKLM\SYSTEM\Run", SegmentTable::standard()).unwrap();
        assert_eq!(node.entries().len(), 1);
    }

    #[test]
    fn test_intermediate_node_with_entries() {
        let records = vec![
            record("parent", &[r"HKLM\SYSTEM"]),
            record("child", &[r"HKLM\SYSTEM\CurrentControlSet"]),
        ];
        let tree = build_tree(&records);
        let system = tree.find(r"HKLM\SYSTEM", SegmentTable::standard()).unwrap();
        assert!(system.has_children());
        assert!(system.has_entries());
        assert_eq!(system.entries()[0].id, "parent");
    }

    #[test]
    fn test_records_without_segments_contribute_nothing() {
        let records = vec![record("none", &[]), record("blank", &["", r"\\"])];
        let tree = build_tree(&records);
        assert!(tree.is_empty());
        assert!(tree.all_paths().is_empty());
        assert_eq!(tree.node_count(), 0);
    }

    #[test]
    fn test_all_paths_pre_order() {
        let records = vec![
            record("a", &[r"HKLM\SOFTWARE\Microsoft", r"HKCU\Environment"]),
            record("b", &[r"HKLM\SYSTEM"]),
        ];
        let tree = build_tree(&records);
        assert_eq!(
            tree.all_paths(),
            vec![
                "HKLM",
                r"HKLM\SOFTWARE",
                r"HKLM\SOFTWARE\Microsoft",
                r"HKLM\SYSTEM",
                "HKCU",
                r"HKCU\Environment",
            ]
        );
        assert_eq!(tree.node_count(), 6);
    }

    #[test]
    fn test_deep_path_is_walked_iteratively() {
        let deep: String = (0..500).map(|i| format!(r"\k{i}")).collect();
        let raw = format!("HKLM{deep}");
        let records = vec![record("deep", &[raw.as_str()])];
        let tree = build_tree(&records);
        assert_eq!(tree.all_paths().len(), 501);
    }

    #[test]
    fn test_sorted_children() {
        let records = vec![record("a", &[r"HKLM\b", r"HKLM\C", r"HKLM\a"])];
        let tree = build_tree(&records);
        let hklm = tree.root().child("hklm").unwrap();
        let names: Vec<&str> = hklm.sorted_children().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["C", "a", "b"]);
    }

    #[test]
    fn test_hive_ordering() {
        let records = vec![record(
            "a",
            &[r"HKU\x", r"HKEY_CURRENT_CONFIG\x", r"HKCR\x", r"HKLM\x", r"HKCU\x"],
        )];
        let tree = build_tree(&records);
        let order = ["HKLM", "HKCU", "HKCR", "HKU"];
        let names: Vec<&str> = tree.hives(&order).iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["HKLM", "HKCU", "HKCR", "HKU", "HKEY_CURRENT_CONFIG"]);
    }

    #[test]
    fn test_find_rejects_empty_and_missing() {
        let tree = build_tree(&[record("a", &[r"HKLM\SYSTEM"])]);
        let table = SegmentTable::standard();
        assert!(tree.find("", table).is_none());
        assert!(tree.find(r"HKLM\SOFTWARE", table).is_none());
        assert!(tree.find(r"HKEY_LOCAL_MACHINE\system", table).is_some());
    }

    #[test]
    fn test_tree_serializes_as_nested_maps() {
        let tree = build_tree(&[record("a", &[r"HKLM\SYSTEM"])]);
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(
            json["root"]["children"]["HKLM"]["children"]["SYSTEM"]["entries"][0]["id"],
            "a"
        );
    }
}
