//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[".lolreg.yaml", ".lolreg.yml", "lolreg.yaml", "lolreg.yml"];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/lolreg/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        tracing::warn!("Config file {} does not exist", path.display());
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    if let Some(path) = dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join("lolreg"))) {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml_ng::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence
    /// wherever it differs from the defaults.
    ///
    /// Used to layer CLI arguments over file config.
    pub fn merge(&mut self, other: &Self) {
        if other.data.dir.is_some() {
            self.data.dir.clone_from(&other.data.dir);
        }

        // Extensions accumulate rather than replace
        for name in &other.registry.extra_segments {
            if !self.registry.extra_segments.contains(name) {
                self.registry.extra_segments.push(name.clone());
            }
        }
        for (long, short) in &other.registry.extra_hives {
            self.registry.extra_hives.insert(long.clone(), short.clone());
        }

        let default_tree = super::types::TreeConfig::default();
        if other.tree.hive_order != default_tree.hive_order {
            self.tree.hive_order.clone_from(&other.tree.hive_order);
        }
        if other.tree.expanded != default_tree.expanded {
            self.tree.expanded.clone_from(&other.tree.expanded);
        }

        if other.output.format != ReportFormat::Auto {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file from the defaults.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# LOLReg Configuration
# Place this file at .lolreg.yaml in your project root or ~/.config/lolreg/

{}",
        serde_yaml_ng::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# LOLReg Configuration File
# ==========================
#
# Place it at:
#   - .lolreg.yaml in your project root
#   - ~/.config/lolreg/lolreg.yaml for global config
#
# CLI arguments always override file settings.

# Record files
data:
  # Directory containing one YAML file per technique
  dir: ./data

# Normalization table extensions
registry:
  # Extra segment names, written in the casing they should be shown in
  extra_segments:
    - Policies
    - Uninstall
  # Extra long hive names and their short form
  extra_hives:
    HKEY_CURRENT_CONFIG: HKCC

# Tree view
tree:
  # Root hives shown first, in this order; others follow alphabetically
  hive_order: [HKLM, HKCU, HKCR, HKU]
  # Paths expanded when the tree opens
  expanded: [HKLM, HKCU, HKCR, HKU]

# Output
output:
  # Format: auto, text, json, markdown
  format: auto
  # Output file path (omit for stdout)
  # file: tree.md
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
