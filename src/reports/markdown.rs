//! Markdown report generator.

use super::escape::{code_fence, code_span, escape_markdown_inline, escape_markdown_table};
use super::{IndexView, ReportError, ReportFormat, ReportGenerator, TreeLayout};
use crate::model::{mitre_url, Record, RecordRef};
use crate::registry::{group_by_hive, FlatIndexEntry, RegistryTree};
use std::fmt::Write as _;

/// Markdown report generator
pub struct MarkdownReporter {
    /// Emit the top-level `#` heading
    include_title: bool,
}

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_title: true,
        }
    }

    /// Skip the top-level heading, for embedding in another page
    #[must_use]
    pub const fn without_title(mut self) -> Self {
        self.include_title = false;
        self
    }

    fn title(&self, out: &mut String, title: &str) -> std::fmt::Result {
        if self.include_title {
            writeln!(out, "# {title}\n")?;
        }
        Ok(())
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn entry_names(entries: &[RecordRef]) -> String {
    entries
        .iter()
        .map(|e| escape_markdown_table(&e.name))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ReportGenerator for MarkdownReporter {
    fn render_catalog(&self, records: &[&Record]) -> Result<String, ReportError> {
        let mut out = String::new();
        self.title(&mut out, "Registry Techniques")?;

        if records.is_empty() {
            out.push_str("_No techniques match._\n");
            return Ok(out);
        }

        out.push_str("| ID | Name | Tags | Keys |\n");
        out.push_str("|----|------|------|------|\n");
        for record in records {
            let tags = record
                .tags
                .iter()
                .map(|t| escape_markdown_table(t))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(
                out,
                "| {} | {} | {} | {} |",
                code_span(&record.id).replace('|', "\\|"),
                escape_markdown_table(&record.name),
                tags,
                record.keys.len()
            )?;
        }
        writeln!(out, "\n{} technique(s)", records.len())?;
        Ok(out)
    }

    fn render_record(&self, record: &Record) -> Result<String, ReportError> {
        let mut out = String::new();
        if self.include_title {
            writeln!(out, "# {}\n", escape_markdown_inline(&record.name))?;
        }
        writeln!(out, "**ID:** {}\n", code_span(&record.id))?;

        if !record.description.is_empty() {
            writeln!(out, "{}\n", escape_markdown_inline(record.description.trim()))?;
        }
        if !record.tags.is_empty() {
            let tags: Vec<String> = record.tags.iter().map(|t| code_span(t)).collect();
            writeln!(out, "**Tags:** {}\n", tags.join(" "))?;
        }
        if !record.mitre_ids.is_empty() {
            out.push_str("## MITRE ATT&CK\n\n");
            for id in &record.mitre_ids {
                writeln!(out, "- [{}]({})", escape_markdown_inline(id), mitre_url(id))?;
            }
            out.push('\n');
        }
        if !record.keys.is_empty() {
            out.push_str("## Registry Keys\n\n");
            for key in &record.keys {
                writeln!(out, "- {}", code_span(key))?;
            }
            out.push('\n');
        }
        if !record.use_cases.is_empty() {
            out.push_str("## Use Cases\n\n");
            for use_case in &record.use_cases {
                writeln!(out, "### {}\n", escape_markdown_inline(&use_case.title))?;
                if !use_case.description.is_empty() {
                    writeln!(out, "{}\n", escape_markdown_inline(use_case.description.trim()))?;
                }
                if !use_case.code.trim().is_empty() {
                    let fence = code_fence(&use_case.code);
                    writeln!(out, "{fence}\n{}\n{fence}\n", use_case.code.trim_end())?;
                }
            }
        }
        if !record.resources.is_empty() {
            out.push_str("## Resources\n\n");
            for resource in &record.resources {
                writeln!(out, "- <{}>", resource.link.replace('>', "%3E"))?;
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
        self.title(&mut out, "Registry Tree")?;

        if tree.is_empty() {
            out.push_str("_No registry keys._\n");
            return Ok(out);
        }

        for row in layout.visible_rows(tree) {
            let name = code_span(row.name);
            let suffix = if row.node.has_children() && !row.expanded {
                " …"
            } else {
                ""
            };
            write!(out, "{}- {name}{suffix}", "  ".repeat(row.depth))?;
            if row.node.has_entries() {
                write!(out, ": {}", entry_names(row.node.entries()))?;
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
        self.title(&mut out, "Registry Key Index")?;

        if entries.is_empty() {
            out.push_str("_No registry keys match._\n");
            return Ok(out);
        }

        let table = |out: &mut String, rows: &[&FlatIndexEntry]| -> std::fmt::Result {
            out.push_str("| Path | Techniques |\n|------|------------|\n");
            for entry in rows {
                writeln!(
                    out,
                    "| {} | {} |",
                    code_span(&entry.path).replace('|', "\\|"),
                    entry_names(&entry.entries)
                )?;
            }
            Ok(())
        };

        match view {
            IndexView::Alphabetical => table(&mut out, entries)?,
            IndexView::Hive => {
                for (hive, group) in group_by_hive(entries.iter().copied()) {
                    writeln!(out, "## {} ({})\n", escape_markdown_inline(hive), group.len())?;
                    table(&mut out, &group)?;
                    out.push('\n');
                }
            }
        }
        Ok(out)
    }

    fn render_paths(&self, paths: &[String]) -> Result<String, ReportError> {
        let mut out = String::new();
        self.title(&mut out, "Registry Paths")?;
        for path in paths {
            writeln!(out, "- {}", code_span(path))?;
        }
        Ok(out)
    }

    fn render_tags(&self, tags: &[&str]) -> Result<String, ReportError> {
        let mut out = String::new();
        self.title(&mut out, "Tags")?;
        for tag in tags {
            writeln!(out, "- {}", code_span(tag))?;
        }
        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UseCase;
    use crate::registry::{build_index, build_tree, filter_index, ExpansionState};

    fn records() -> Vec<Record> {
        vec![
            Record::new("run", "Run | Keys")
                .with_tags(["persistence"])
                .with_keys([r"HKCU\Software\Run"]),
            Record::new("svc", "Service [Image]").with_keys([r"HKLM\SYSTEM\Services"]),
        ]
    }

    #[test]
    fn test_catalog_escapes_cells() {
        let records = records();
        let refs: Vec<&Record> = records.iter().collect();
        let out = MarkdownReporter::new().render_catalog(&refs).unwrap();
        assert!(out.starts_with("# Registry Techniques\n\n| ID |"));
        assert!(out.contains("| `run` | Run \\| Keys | persistence | 1 |"));
        assert!(out.contains("Service \\[Image\\]"));
    }

    #[test]
    fn test_catalog_escapes_pipe_in_id() {
        let record = Record::new("a|b", "Piped");
        let out = MarkdownReporter::new().render_catalog(&[&record]).unwrap();
        assert!(out.contains("| `a\\|b` | Piped |  | 0 |"), "{out}");
    }

    #[test]
    fn test_record_code_block() {
        let mut record = records().remove(0);
        record.mitre_ids = vec!["T1547.001".to_string()];
        record.use_cases = vec![UseCase {
            title: "Persist".to_string(),
            description: "Adds a value".to_string(),
            code: "reg add HKCU\\Software\\Run\n".to_string(),
        }];

        let out = MarkdownReporter::new().without_title().render_record(&record).unwrap();
        assert!(out.starts_with("**ID:** `run`"));
        assert!(out.contains("- [T1547.001](https://attack.mitre.org/techniques/T1547/001/)"));
        assert!(out.contains("- `HKCU\\Software\\Run`"));
        assert!(out.contains("```\nreg add HKCU\\Software\\Run\n```"));
    }

    #[test]
    fn test_tree_nested_list() {
        let tree = build_tree(&records());
        let order = vec!["HKLM".to_string(), "HKCU".to_string()];
        let expansion = ExpansionState::with_paths(["HKCU", r"HKCU\SOFTWARE"]);
        let layout = TreeLayout {
            hive_order: &order,
            expansion: &expansion,
        };
        let out = MarkdownReporter::new()
            .without_title()
            .render_tree(&tree, &layout)
            .unwrap();
        assert_eq!(
            out,
            "- `HKLM` …\n- `HKCU`\n  - `SOFTWARE`\n    - `Run`: Run \\| Keys\n"
        );
    }

    #[test]
    fn test_index_grouped_by_hive() {
        let index = build_index(&records());
        let entries = filter_index(&index, "");
        let out = MarkdownReporter::new()
            .render_index(&entries, IndexView::Hive)
            .unwrap();
        let hkcu = out.find("## HKCU (1)").unwrap();
        let hklm = out.find("## HKLM (1)").unwrap();
        assert!(hkcu < hklm);
        assert!(out.contains("| `HKLM\\SYSTEM\\Services` | Service \\[Image\\] |"));
    }
}
