//! Report generation for catalog, tree and index views.
//!
//! This module provides multiple output formats:
//! - Text: aligned terminal output
//! - JSON: structured data for programmatic integration
//! - Markdown: documentation pages
//!
//! # Security
//!
//! The `escape` module provides utilities for safe output generation.
//! All record data (names, descriptions, tags, key paths) should be
//! escaped before embedding in Markdown reports.

pub mod escape;
mod json;
mod markdown;
mod text;
mod types;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use text::TextReporter;
pub use types::{IndexView, ReportFormat, TreeLayout, TreeRow};

use crate::model::Record;
use crate::registry::{FlatIndexEntry, RegistryTree};
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Catalog listing of (already filtered) records
    fn render_catalog(&self, records: &[&Record]) -> Result<String, ReportError>;

    /// Detail page for one record
    fn render_record(&self, record: &Record) -> Result<String, ReportError>;

    /// Registry tree under the given layout
    fn render_tree(&self, tree: &RegistryTree, layout: &TreeLayout<'_>)
        -> Result<String, ReportError>;

    /// Key index entries in the given view
    fn render_index(
        &self,
        entries: &[&FlatIndexEntry],
        view: IndexView,
    ) -> Result<String, ReportError>;

    /// Every addressable node path
    fn render_paths(&self, paths: &[String]) -> Result<String, ReportError>;

    /// Distinct tags
    fn render_tags(&self, tags: &[&str]) -> Result<String, ReportError>;

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;

    /// Write a rendered report to a writer
    fn write_report(&self, report: &str, writer: &mut dyn Write) -> Result<(), ReportError> {
        writer.write_all(report.as_bytes())?;
        if !report.ends_with('\n') {
            writer.write_all(b"\n")?;
        }
        Ok(())
    }
}

/// Create a report generator for the given format.
///
/// `Auto` that was not resolved beforehand falls back to text.
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Auto | ReportFormat::Text => Box::new(TextReporter::new()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_reporter_formats() {
        assert_eq!(create_reporter(ReportFormat::Auto).format(), ReportFormat::Text);
        assert_eq!(create_reporter(ReportFormat::Json).format(), ReportFormat::Json);
        assert_eq!(
            create_reporter(ReportFormat::Markdown).format(),
            ReportFormat::Markdown
        );
    }

    #[test]
    fn test_write_report_adds_newline() {
        let reporter = TextReporter::new();
        let mut out = Vec::new();
        reporter.write_report("line", &mut out).unwrap();
        assert_eq!(out, b"line\n");
    }
}
