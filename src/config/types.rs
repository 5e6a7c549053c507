//! Configuration types for lolreg.

use super::defaults::{default_expanded, default_hive_order, DEFAULT_DATA_DIR};
use crate::registry::{ExpansionState, SegmentTable};
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration, loaded from a config file and/or CLI
/// arguments (CLI wins).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Where record files live
    pub data: DataConfig,
    /// Normalization table extensions
    pub registry: RegistryConfig,
    /// Tree view defaults
    pub tree: TreeConfig,
    /// Output format and destination
    pub output: OutputConfig,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the data directory.
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.data.dir = Some(dir.into());
        self
    }

    /// Add a well-known segment name to the normalization table.
    pub fn extra_segment(mut self, name: impl Into<String>) -> Self {
        self.config.registry.extra_segments.push(name.into());
        self
    }

    /// Add a long → short hive alias.
    pub fn extra_hive(mut self, long: impl Into<String>, short: impl Into<String>) -> Self {
        self.config
            .registry
            .extra_hives
            .insert(long.into(), short.into());
        self
    }

    /// Set the root hive display order.
    pub fn hive_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.tree.hive_order = order.into_iter().map(Into::into).collect();
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Location of the record files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DataConfig {
    /// Directory of `*.yml` / `*.yaml` record files (default: `data`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl DataConfig {
    /// The configured directory, or [`DEFAULT_DATA_DIR`].
    pub fn effective_dir(&self) -> PathBuf {
        self.dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }
}

/// Extensions to the canonical-casing table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RegistryConfig {
    /// Extra well-known segment names, written in their canonical casing
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_segments: Vec<String>,
    /// Extra long hive names mapped to their short form
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_hives: BTreeMap<String, String>,
}

impl RegistryConfig {
    /// The standard table extended with this section's entries.
    pub fn segment_table(&self) -> SegmentTable {
        SegmentTable::default()
            .with_segments(&self.extra_segments)
            .with_hive_aliases(&self.extra_hives)
    }

    pub fn is_default(&self) -> bool {
        self.extra_segments.is_empty() && self.extra_hives.is_empty()
    }
}

/// Tree view defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TreeConfig {
    /// Root hives shown first, in this order; others follow alphabetically
    pub hive_order: Vec<String>,
    /// Paths expanded when the tree opens
    pub expanded: Vec<String>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            hive_order: default_hive_order(),
            expanded: default_expanded(),
        }
    }
}

impl TreeConfig {
    /// Initial expansion state for the tree view.
    pub fn initial_expansion(&self) -> ExpansionState {
        ExpansionState::with_paths(&self.expanded)
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (stdout if not specified)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}
