//! Plain text report generator for terminal output.

use super::{IndexView, ReportError, ReportFormat, ReportGenerator, TreeLayout};
use crate::model::{mitre_url, Record, RecordRef};
use crate::registry::{group_by_hive, FlatIndexEntry, RegistryTree};
use std::fmt::Write as _;
use unicode_width::UnicodeWidthStr;

/// Widest the name column of the catalog grows before it stops aligning.
const MAX_NAME_WIDTH: usize = 48;

/// Text reporter
pub struct TextReporter {
    /// Indentation per tree level
    indent: usize,
}

impl TextReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { indent: 2 }
    }

    /// Set the indentation per tree level
    #[must_use]
    pub const fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Pad `s` with spaces to `width` terminal columns.
fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - w))
    }
}

fn names(entries: &[RecordRef]) -> String {
    entries
        .iter()
        .map(|e| e.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ReportGenerator for TextReporter {
    fn render_catalog(&self, records: &[&Record]) -> Result<String, ReportError> {
        let mut out = String::new();
        if records.is_empty() {
            out.push_str("No techniques match.\n");
            return Ok(out);
        }

        let id_width = records
            .iter()
            .map(|r| UnicodeWidthStr::width(r.id.as_str()))
            .max()
            .unwrap_or(0)
            .max(2);
        let name_width = records
            .iter()
            .map(|r| UnicodeWidthStr::width(r.name.as_str()))
            .max()
            .unwrap_or(0)
            .clamp(4, MAX_NAME_WIDTH);

        writeln!(out, "{}  {}  TAGS", pad("ID", id_width), pad("NAME", name_width))?;
        for record in records {
            writeln!(
                out,
                "{}  {}  {}",
                pad(&record.id, id_width),
                pad(&record.name, name_width),
                record.tags.join(", ")
            )?;
        }
        writeln!(out, "\n{} technique(s)", records.len())?;
        Ok(out)
    }

    fn render_record(&self, record: &Record) -> Result<String, ReportError> {
        let mut out = String::new();
        let title = format!("{} ({})", record.name, record.id);
        writeln!(out, "{title}")?;
        writeln!(out, "{}", "=".repeat(UnicodeWidthStr::width(title.as_str())))?;

        if !record.description.is_empty() {
            writeln!(out, "\n{}", record.description.trim_end())?;
        }
        if !record.tags.is_empty() {
            writeln!(out, "\nTags: {}", record.tags.join(", "))?;
        }
        if !record.mitre_ids.is_empty() {
            writeln!(out, "\nMITRE ATT&CK:")?;
            for id in &record.mitre_ids {
                writeln!(out, "  {id}  {}", mitre_url(id))?;
            }
        }
        if !record.keys.is_empty() {
            writeln!(out, "\nRegistry keys:")?;
            for key in &record.keys {
                writeln!(out, "  {key}")?;
            }
        }
        if !record.use_cases.is_empty() {
            writeln!(out, "\nUse cases:")?;
            for use_case in &record.use_cases {
                writeln!(out, "  {}", use_case.title)?;
                if !use_case.description.is_empty() {
                    writeln!(out, "    {}", use_case.description.trim_end())?;
                }
                for line in use_case.code.lines() {
                    writeln!(out, "    | {line}")?;
                }
            }
        }
        if !record.resources.is_empty() {
            writeln!(out, "\nResources:")?;
            for resource in &record.resources {
                writeln!(out, "  {}", resource.link)?;
            }
        }
        Ok(out)
    }

    fn render_tree(
        &self,
        tree: &RegistryTree,
        layout: &TreeLayout<'_>,
    ) -> Result<String, ReportError> {
        let mut out = String::new();
        if tree.is_empty() {
            out.push_str("(no registry keys)\n");
            return Ok(out);
        }

        for row in layout.visible_rows(tree) {
            let marker = if !row.node.has_children() {
                "•"
            } else if row.expanded {
                "▾"
            } else {
                "▸"
            };
            write!(out, "{}{marker} {}", " ".repeat(row.depth * self.indent), row.name)?;
            if row.node.has_entries() {
                write!(out, "  [{}]", names(row.node.entries()))?;
            }
            out.push('\n');
        }
        Ok(out)
    }

    fn render_index(
        &self,
        entries: &[&FlatIndexEntry],
        view: IndexView,
    ) -> Result<String, ReportError> {
        let mut out = String::new();
        if entries.is_empty() {
            out.push_str("No registry keys match.\n");
            return Ok(out);
        }

        match view {
            IndexView::Alphabetical => {
                for entry in entries {
                    writeln!(out, "{}  [{}]", entry.path, names(&entry.entries))?;
                }
            }
            IndexView::Hive => {
                for (hive, group) in group_by_hive(entries.iter().copied()) {
                    writeln!(out, "{hive} ({})", group.len())?;
                    for entry in group {
                        writeln!(out, "  {}  [{}]", entry.path, names(&entry.entries))?;
                    }
                    out.push('\n');
                }
            }
        }
        writeln!(out, "{} key(s)", entries.len())?;
        Ok(out)
    }

    fn render_paths(&self, paths: &[String]) -> Result<String, ReportError> {
        let mut out = String::new();
        for path in paths {
            writeln!(out, "{path}")?;
        }
        Ok(out)
    }

    fn render_tags(&self, tags: &[&str]) -> Result<String, ReportError> {
        let mut out = String::new();
        for tag in tags {
            writeln!(out, "{tag}")?;
        }
        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Text
    }
}
