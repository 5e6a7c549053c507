//! JSON report generator.

use super::{IndexView, ReportError, ReportFormat, ReportGenerator, TreeLayout};
use crate::model::{mitre_url, Record, RecordRef, Resource, UseCase};
use crate::registry::{group_by_hive, FlatIndexEntry, RegistryTree, TreeNode};
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn to_json<T: Serialize>(&self, report: &JsonReport<T>) -> Result<String, ReportError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }

    fn wrap<T: Serialize>(&self, kind: &'static str, data: T) -> Result<String, ReportError> {
        self.to_json(&JsonReport {
            metadata: JsonReportMetadata::new(kind),
            data,
        })
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn render_catalog(&self, records: &[&Record]) -> Result<String, ReportError> {
        let summaries: Vec<RecordSummary<'_>> = records
            .iter()
            .map(|r| RecordSummary {
                id: &r.id,
                name: &r.name,
                tags: &r.tags,
                key_count: r.keys.len(),
            })
            .collect();
        self.wrap(
            "catalog",
            CatalogData {
                count: summaries.len(),
                records: summaries,
            },
        )
    }

    fn render_record(&self, record: &Record) -> Result<String, ReportError> {
        let mitre = record
            .mitre_ids
            .iter()
            .map(|id| MitreLink {
                id,
                url: mitre_url(id),
            })
            .collect();
        self.wrap(
            "record",
            RecordDetail {
                id: &record.id,
                name: &record.name,
                description: &record.description,
                tags: &record.tags,
                mitre,
                keys: &record.keys,
                use_cases: &record.use_cases,
                resources: &record.resources,
            },
        )
    }

    fn render_tree(
        &self,
        tree: &RegistryTree,
        layout: &TreeLayout<'_>,
    ) -> Result<String, ReportError> {
        let hives = tree
            .hives(layout.hive_order)
            .into_iter()
            .map(|(name, node)| TreeHive { name, node })
            .collect();
        let visible = layout
            .visible_rows(tree)
            .into_iter()
            .map(|row| VisibleRow {
                depth: row.depth,
                path: row.path,
                expanded: row.expanded,
                has_children: row.node.has_children(),
                entries: row.node.entries(),
            })
            .collect();
        self.wrap(
            "tree",
            TreeData {
                node_count: tree.node_count(),
                hives,
                visible,
            },
        )
    }

    fn render_index(
        &self,
        entries: &[&FlatIndexEntry],
        view: IndexView,
    ) -> Result<String, ReportError> {
        let data = match view {
            IndexView::Alphabetical => IndexData::Alphabetical {
                count: entries.len(),
                entries: entries.to_vec(),
            },
            IndexView::Hive => IndexData::Hive {
                count: entries.len(),
                hives: group_by_hive(entries.iter().copied())
                    .into_iter()
                    .map(|(hive, entries)| HiveGroup { hive, entries })
                    .collect(),
            },
        };
        self.wrap("index", data)
    }

    fn render_paths(&self, paths: &[String]) -> Result<String, ReportError> {
        self.wrap("paths", paths)
    }

    fn render_tags(&self, tags: &[&str]) -> Result<String, ReportError> {
        self.wrap("tags", tags)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// JSON structures

#[derive(Serialize)]
struct JsonReport<T> {
    metadata: JsonReportMetadata,
    data: T,
}

#[derive(Serialize)]
struct JsonReportMetadata {
    tool: ToolInfo,
    report: &'static str,
    generated_at: String,
}

impl JsonReportMetadata {
    fn new(report: &'static str) -> Self {
        Self {
            tool: ToolInfo {
                name: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
            },
            report,
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct CatalogData<'a> {
    count: usize,
    records: Vec<RecordSummary<'a>>,
}

#[derive(Serialize)]
struct RecordSummary<'a> {
    id: &'a str,
    name: &'a str,
    tags: &'a [String],
    key_count: usize,
}

#[derive(Serialize)]
struct RecordDetail<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
    tags: &'a [String],
    mitre: Vec<MitreLink<'a>>,
    keys: &'a [String],
    use_cases: &'a [UseCase],
    resources: &'a [Resource],
}

#[derive(Serialize)]
struct MitreLink<'a> {
    id: &'a str,
    url: String,
}

#[derive(Serialize)]
struct TreeData<'a> {
    node_count: usize,
    hives: Vec<TreeHive<'a>>,
    visible: Vec<VisibleRow<'a>>,
}

#[derive(Serialize)]
struct TreeHive<'a> {
    name: &'a str,
    node: &'a TreeNode,
}

#[derive(Serialize)]
struct VisibleRow<'a> {
    depth: usize,
    path: String,
    expanded: bool,
    has_children: bool,
    entries: &'a [RecordRef],
}

#[derive(Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
enum IndexData<'a> {
    Hive {
        count: usize,
        hives: Vec<HiveGroup<'a>>,
    },
    Alphabetical {
        count: usize,
        entries: Vec<&'a FlatIndexEntry>,
    },
}

#[derive(Serialize)]
struct HiveGroup<'a> {
    hive: &'a str,
    entries: Vec<&'a FlatIndexEntry>,
}
